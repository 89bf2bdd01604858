// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

//! Line filter tests over in-memory readers and writers.

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use replytrim::config::Config;
use replytrim::error::Error;
use replytrim::services::filter::{Emit, FilterStats, LineFilter};

// ─── Test helpers ────────────────────────────────────────────────────────────

async fn run(config: &Config, emit: Emit, input: &str) -> (Result<FilterStats, Error>, String) {
    run_bytes(config, emit, input.as_bytes()).await
}

async fn run_bytes(
    config: &Config,
    emit: Emit,
    input: &[u8],
) -> (Result<FilterStats, Error>, String) {
    let filter = LineFilter::new(config, emit);
    let mut out = Vec::new();
    let result = filter
        .run(input, &mut out, &CancellationToken::new())
        .await;
    (result, String::from_utf8(out).unwrap())
}

fn oversized_message(len: usize) -> String {
    format!(
        r#"{{"result_message":[{{"type":"text","text":"{}"}}]}}"#,
        "x".repeat(len)
    )
}

fn output_lines(out: &str) -> Vec<Value> {
    out.lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

const MARKED: &str = r#"{"result_message":[{"type":"text","text":"想法 最终的罗莎回复：你好"},{"type":"image","id":1}],"id":"m1"}"#;
const UNMARKED: &str = r#"{"chain": [{"type": "plain", "text": "普通回复"}], "id": "m2"}"#;
const EMPTY_AFTER: &str = r#"{"result_message":[{"type":"text","text":"最终的罗莎回复 "}],"id":"m3"}"#;

// ─── Messages mode ───────────────────────────────────────────────────────────

#[tokio::test]
async fn rewrites_marked_messages() {
    let (result, out) = run(&Config::default(), Emit::Messages, MARKED).await;
    let stats = result.unwrap();
    assert_eq!(stats.rewritten, 1);

    let lines = output_lines(&out);
    assert_eq!(
        lines,
        vec![json!({
            "result_message": [{"type": "text", "text": "你好"}, {"type": "image", "id": 1}],
            "id": "m1",
        })]
    );
}

#[tokio::test]
async fn unmarked_messages_are_echoed_verbatim() {
    let (result, out) = run(&Config::default(), Emit::Messages, UNMARKED).await;
    assert_eq!(result.unwrap().processed, 1);
    assert_eq!(out, format!("{UNMARKED}\n"));
}

#[tokio::test]
async fn suppressed_messages_are_dropped() {
    let input = format!("{EMPTY_AFTER}\n{UNMARKED}\n");
    let (result, out) = run(&Config::default(), Emit::Messages, &input).await;
    let stats = result.unwrap();
    assert_eq!(stats.suppressed, 1);
    assert_eq!(stats.processed, 2);
    assert_eq!(out, format!("{UNMARKED}\n"));
}

#[tokio::test]
async fn blank_lines_are_ignored() {
    let input = format!("\n   \n{UNMARKED}\n\n");
    let (result, out) = run(&Config::default(), Emit::Messages, &input).await;
    assert_eq!(result.unwrap(), FilterStats {
        processed: 1,
        ..FilterStats::default()
    });
    assert_eq!(out.lines().count(), 1);
}

#[tokio::test]
async fn disabled_filter_passes_everything() {
    let config = Config {
        enabled: false,
        ..Config::default()
    };
    let input = format!("{MARKED}\n{EMPTY_AFTER}\nnot json\n");
    let (result, out) = run(&config, Emit::Messages, &input).await;
    assert_eq!(result.unwrap().processed, 3);
    assert_eq!(out, input);
}

// ─── Actions mode ────────────────────────────────────────────────────────────

#[tokio::test]
async fn actions_mode_reports_every_line() {
    let input = format!("{MARKED}\n{UNMARKED}\n{EMPTY_AFTER}\n");
    let (result, out) = run(&Config::default(), Emit::Actions, &input).await;
    result.unwrap();

    let lines = output_lines(&out);
    let actions: Vec<_> = lines.iter().map(|l| l["action"].as_str().unwrap()).collect();
    assert_eq!(actions, ["rewrite", "pass", "suppress"]);
    assert_eq!(lines[1]["line"], 2);
    assert_eq!(lines[1]["message"]["chain"][0]["text"], "普通回复");
    assert_eq!(lines[2]["message"]["cancelled"], true);
}

// ─── Bad input ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn malformed_lines_are_skipped_by_default() {
    let input = format!("{{not json\n{UNMARKED}\n");
    let (result, out) = run(&Config::default(), Emit::Messages, &input).await;
    let stats = result.unwrap();
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.processed, 1);
    assert_eq!(out.lines().count(), 1);
}

#[tokio::test]
async fn strict_mode_fails_on_malformed_line() {
    let config = Config {
        strict: true,
        ..Config::default()
    };
    let input = format!("{UNMARKED}\n[1, 2]\n");
    let (result, _) = run(&config, Emit::Messages, &input).await;
    assert!(matches!(
        result,
        Err(Error::MalformedMessage { line: 2, .. })
    ));
}

#[tokio::test]
async fn oversized_lines_are_rejected_in_strict_mode() {
    let config = Config {
        strict: true,
        max_line_bytes: 1024,
        ..Config::default()
    };
    let (result, _) = run(&config, Emit::Messages, &oversized_message(2000)).await;
    assert!(matches!(
        result,
        Err(Error::LineTooLong { line: 1, limit: 1024 })
    ));
}

#[tokio::test]
async fn oversized_lines_are_skipped_and_the_next_line_still_runs() {
    let config = Config {
        max_line_bytes: 1024,
        ..Config::default()
    };
    let input = format!("{}\n{UNMARKED}\n", oversized_message(4096));
    let (result, out) = run(&config, Emit::Messages, &input).await;
    let stats = result.unwrap();
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.processed, 1);
    assert_eq!(out, format!("{UNMARKED}\n"));
}

#[tokio::test]
async fn oversized_line_spanning_many_reads_is_skipped() {
    let config = Config {
        max_line_bytes: 1024,
        ..Config::default()
    };
    let input = format!("{}\n{MARKED}\n", oversized_message(64 * 1024));
    let reader = tokio::io::BufReader::with_capacity(64, input.as_bytes());

    let filter = LineFilter::new(&config, Emit::Actions);
    let mut out = Vec::new();
    let stats = filter
        .run(reader, &mut out, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.rewritten, 1);

    let lines = output_lines(&String::from_utf8(out).unwrap());
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["line"], 2);
}

#[tokio::test]
async fn invalid_utf8_line_is_skipped_by_default() {
    let mut input = b"\xff\xfe garbage\n".to_vec();
    input.extend_from_slice(UNMARKED.as_bytes());
    input.push(b'\n');

    let (result, out) = run_bytes(&Config::default(), Emit::Messages, &input).await;
    let stats = result.unwrap();
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.processed, 1);
    assert_eq!(out, format!("{UNMARKED}\n"));
}

#[tokio::test]
async fn strict_mode_fails_on_invalid_utf8() {
    let config = Config {
        strict: true,
        ..Config::default()
    };
    let (result, out) = run_bytes(&config, Emit::Messages, b"\xff\xfe garbage\n").await;
    assert!(matches!(
        result,
        Err(Error::MalformedMessage { line: 1, .. })
    ));
    assert!(out.is_empty());
}

#[tokio::test]
async fn crlf_line_endings_are_accepted() {
    let input = format!("{UNMARKED}\r\n{MARKED}\r\n");
    let (result, out) = run(&Config::default(), Emit::Messages, &input).await;
    let stats = result.unwrap();
    assert_eq!(stats.processed, 2);
    assert_eq!(stats.rewritten, 1);
    assert_eq!(out.lines().next(), Some(UNMARKED));
}

#[tokio::test]
async fn null_result_message_falls_back_to_chain() {
    let input = r#"{"result_message":null,"chain":[{"type":"text","text":"想法 最终的罗莎回复：好的"}]}"#;
    let (result, out) = run(&Config::default(), Emit::Messages, input).await;
    assert_eq!(result.unwrap().rewritten, 1);
    assert_eq!(
        output_lines(&out),
        vec![json!({
            "result_message": null,
            "chain": [{"type": "text", "text": "好的"}],
        })]
    );
}

#[tokio::test]
async fn cancelled_run_stops_early() {
    let filter = LineFilter::new(&Config::default(), Emit::Messages);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut out = Vec::new();
    let result = filter.run(UNMARKED.as_bytes(), &mut out, &cancel).await;
    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(out.is_empty());
}
