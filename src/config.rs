// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::services::host::DEFAULT_PRIORITY;

const MIN_LINE_BYTES: usize = 1024;
const MAX_LINE_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Trim outgoing messages (default: true). When false, messages pass
    /// through untouched.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Fail the run on a malformed or oversized line instead of skipping it
    #[serde(default)]
    pub strict: bool,

    /// Longest accepted input line in bytes (default 1 MiB)
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,

    /// Host ordering hint for the result-decorating stage (default 200)
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_true() -> bool {
    true
}
fn default_max_line_bytes() -> usize {
    1024 * 1024
}
fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            strict: false,
            max_line_bytes: default_max_line_bytes(),
            priority: default_priority(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.replytrim.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".replytrim.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // REPLYTRIM_ENABLED, REPLYTRIM_MAX_LINE_BYTES, ...
        figment = figment.merge(Env::prefixed("REPLYTRIM_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "replytrim").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if cli.strict {
            self.strict = true;
        }
        if cli.disable {
            self.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_LINE_BYTES..=MAX_LINE_BYTES).contains(&self.max_line_bytes) {
            return Err(Error::Config(format!(
                "max_line_bytes must be {MIN_LINE_BYTES}–{MAX_LINE_BYTES}, got {}",
                self.max_line_bytes
            )));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# replytrim configuration

# Trim the final-reply marker from outgoing messages
enabled = true

# Abort on malformed or oversized input lines instead of skipping them
strict = false

# Longest accepted input line in bytes
max_line_bytes = 1048576

# Ordering hint for hosts that run several result decorators
priority = 200
"#;

        fs::write(&path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
