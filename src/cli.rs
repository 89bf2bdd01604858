// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::Parser;

use crate::services::filter::Emit;

#[derive(Parser, Debug)]
#[command(name = "replytrim")]
#[command(version)]
#[command(
    about = "Strip everything up to the final-reply marker from outgoing messages",
    long_about = None
)]
pub struct Cli {
    /// Read JSON-lines messages from this file instead of stdin
    #[arg(short, long, env = "REPLYTRIM_INPUT")]
    pub input: Option<PathBuf>,

    /// What to write for each processed message
    #[arg(long, value_enum, default_value_t = Emit::Messages)]
    pub emit: Emit,

    /// Abort on the first malformed or oversized line
    #[arg(long)]
    pub strict: bool,

    /// Pass every message through untouched
    #[arg(long)]
    pub disable: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Trim a single plain-text reply and print the result
    Check {
        /// Reply text to trim
        text: String,
    },
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
