// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Malformed message on line {line}: {reason}")]
    #[diagnostic(
        code(replytrim::input::malformed),
        help("Each line must be a JSON object with a `result_message` or `chain` segment array")
    )]
    MalformedMessage { line: usize, reason: String },

    #[error("Line {line} exceeds {limit} bytes")]
    #[diagnostic(
        code(replytrim::input::too_long),
        help("Raise max_line_bytes in the config or set REPLYTRIM_MAX_LINE_BYTES")
    )]
    LineTooLong { line: usize, limit: usize },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(replytrim::config::error))]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(replytrim::json::error))]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
