//! Configuration management for git-review.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "GIT_REVIEW_CONFIG";

/// Global git-review configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub hooks: HooksConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Git hooks behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct HooksConfig {
    /// Command the installed dispatcher scripts exec.
    #[serde(default = "default_command")]
    pub command: String,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Base level used when no `-v` flag is given.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_command() -> String {
    "git-review".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from `$GIT_REVIEW_CONFIG` or ~/.git-review/config.toml.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Path to global git-review directory (~/.git-review/)
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".git-review")
    }

    /// Path to config file
    pub fn path() -> PathBuf {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::global_dir().join("config.toml"),
        }
    }

    /// Log filter directive for a given `-v` count.
    pub fn log_directive(&self, verbose: u8) -> String {
        let level = match verbose {
            0 => self.log.level.as_str(),
            1 => "info",
            _ => "debug",
        };
        format!("git_review={level}")
    }
}
