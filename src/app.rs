// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use console::style;
use tokio::fs::File;
use tokio::io::{self, BufReader};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::Result;
use crate::services::filter::{FilterStats, LineFilter};
use crate::services::host::{PLUGIN_NAME, PLUGIN_VERSION};
use crate::services::trimmer::MarkerTrimmer;

pub struct App {
    cli: Cli,
    config: Config,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            enabled = config.enabled,
            strict = config.strict,
            max_line_bytes = config.max_line_bytes,
            "config loaded"
        );
        let cancel_token = CancellationToken::new();
        Ok(Self {
            cli,
            config,
            cancel_token,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd);
        }

        self.filter_messages().await.map(|_| ())
    }

    async fn filter_messages(&self) -> Result<FilterStats> {
        let filter = LineFilter::new(&self.config, self.cli.emit);
        let stdout = io::stdout();

        match &self.cli.input {
            Some(path) => {
                debug!(path = %path.display(), "reading messages from file");
                let file = File::open(path).await?;
                filter
                    .run(BufReader::new(file), stdout, &self.cancel_token)
                    .await
            }
            None => {
                filter
                    .run(BufReader::new(io::stdin()), stdout, &self.cancel_token)
                    .await
            }
        }
    }

    fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Check { text } => {
                match MarkerTrimmer::trim_text(text) {
                    None => self.print_info("no marker found, reply unchanged"),
                    Some(clean) if clean.is_empty() => {
                        self.print_warning("nothing left after the marker, reply suppressed")
                    }
                    Some(clean) => println!("{clean}"),
                }
                Ok(())
            }
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                println!("Plugin: {PLUGIN_NAME} {PLUGIN_VERSION}");
                println!("Enabled: {}", self.config.enabled);
                println!("Strict: {}", self.config.strict);
                println!("Max line bytes: {}", self.config.max_line_bytes);
                println!("Priority: {}", self.config.priority);
                if let Some(path) = Config::config_path() {
                    println!("User config: {}", path.display());
                }
                Ok(())
            }
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "replytrim", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}
