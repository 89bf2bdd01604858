// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::TrimAction;
use crate::error::{Error, Result};
use crate::services::envelope::Envelope;
use crate::services::host;

/// One newline-terminated unit of input.
enum Frame {
    Line(Vec<u8>),
    /// Longer than the limit; its bytes were consumed without being kept.
    TooLong,
}

/// Read up to the next `\n`, holding at most `limit` bytes in memory.
///
/// Returns `None` at end of input. A trailing `\r` is stripped.
async fn read_frame<R>(reader: &mut R, limit: usize) -> std::io::Result<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut overflow = false;
    let mut read_any = false;

    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }
        read_any = true;

        let newline = available.iter().position(|&b| b == b'\n');
        let chunk = &available[..newline.unwrap_or(available.len())];
        if !overflow {
            if buf.len() + chunk.len() > limit {
                overflow = true;
                buf = Vec::new();
            } else {
                buf.extend_from_slice(chunk);
            }
        }

        let consumed = newline.map_or(available.len(), |i| i + 1);
        reader.consume(consumed);
        if newline.is_some() {
            break;
        }
    }

    if !read_any {
        return Ok(None);
    }
    if overflow {
        return Ok(Some(Frame::TooLong));
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Some(Frame::Line(buf)))
}

/// Output shape of the line filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Emit {
    /// The processed message; suppressed messages are dropped
    #[default]
    Messages,
    /// One `{line, action, message}` record per input line
    Actions,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub processed: usize,
    pub rewritten: usize,
    pub suppressed: usize,
    pub skipped: usize,
}

impl FilterStats {
    fn record(&mut self, action: &TrimAction) {
        self.processed += 1;
        match action {
            TrimAction::Pass => {}
            TrimAction::Rewrite(_) => self.rewritten += 1,
            TrimAction::Suppress => self.suppressed += 1,
        }
    }
}

/// Applies the marker trimmer to a stream of JSON-lines messages, one
/// message per line, in input order.
#[derive(Debug, Clone)]
pub struct LineFilter {
    enabled: bool,
    strict: bool,
    max_line_bytes: usize,
    emit: Emit,
}

impl LineFilter {
    pub fn new(config: &Config, emit: Emit) -> Self {
        Self {
            enabled: config.enabled,
            strict: config.strict,
            max_line_bytes: config.max_line_bytes,
            emit,
        }
    }

    pub async fn run<R, W>(
        &self,
        mut reader: R,
        mut writer: W,
        cancel: &CancellationToken,
    ) -> Result<FilterStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut stats = FilterStats::default();
        let mut line_no = 0usize;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                frame = read_frame(&mut reader, self.max_line_bytes) => frame?,
            };
            let Some(frame) = next else { break };
            line_no += 1;

            let outcome = match frame {
                Frame::TooLong => Err(Error::LineTooLong {
                    line: line_no,
                    limit: self.max_line_bytes,
                }),
                Frame::Line(bytes) => match String::from_utf8(bytes) {
                    Ok(line) if line.trim().is_empty() => continue,
                    Ok(line) => self.process_line(line_no, &line),
                    Err(e) => Err(Error::MalformedMessage {
                        line: line_no,
                        reason: e.to_string(),
                    }),
                },
            };

            match outcome {
                Ok((action, output)) => {
                    stats.record(&action);
                    if let Some(out) = output {
                        writer.write_all(out.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                    }
                }
                Err(e) if !self.strict => {
                    warn!(line = line_no, error = %e, "skipping unreadable message");
                    stats.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        writer.flush().await?;
        info!(
            processed = stats.processed,
            rewritten = stats.rewritten,
            suppressed = stats.suppressed,
            skipped = stats.skipped,
            "input exhausted"
        );
        Ok(stats)
    }

    /// Returns the action taken and the line to emit, if any.
    fn process_line(&self, line_no: usize, line: &str) -> Result<(TrimAction, Option<String>)> {
        if !self.enabled && self.emit == Emit::Messages {
            return Ok((TrimAction::Pass, Some(line.to_string())));
        }

        let mut envelope: Envelope =
            serde_json::from_str(line).map_err(|e| Error::MalformedMessage {
                line: line_no,
                reason: e.to_string(),
            })?;

        let action = if self.enabled {
            host::apply(&mut envelope)
        } else {
            TrimAction::Pass
        };
        debug!(line = line_no, action = %action, "message processed");

        let output = match self.emit {
            // Untouched messages are echoed byte for byte.
            Emit::Messages => match action {
                TrimAction::Pass => Some(line.to_string()),
                TrimAction::Rewrite(_) => Some(serde_json::to_string(&envelope)?),
                TrimAction::Suppress => None,
            },
            Emit::Actions => Some(serde_json::to_string(&json!({
                "line": line_no,
                "action": action.as_str(),
                "message": envelope,
            }))?),
        };

        Ok((action, output))
    }
}
