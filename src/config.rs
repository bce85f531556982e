use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "dessert-clicker.toml";

#[derive(Debug, Parser)]
#[command(name = "dessert-clicker", version, about = "Sell desserts, unlock new ones")]
pub struct Cli {
    /// TOML config file (defaults to ./dessert-clicker.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Milliseconds between elapsed-time ticks
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Append shared summaries to this file
    #[arg(long)]
    pub share_file: Option<PathBuf>,

    /// Directory for the log file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_interval_ms: u64,
    pub share_file: Option<PathBuf>,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            share_file: None,
            log_dir: PathBuf::from("."),
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        if let Some(tick_ms) = cli.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(share_file) = &cli.share_file {
            config.share_file = Some(share_file.clone());
        }
        if let Some(log_dir) = &cli.log_dir {
            config.log_dir = log_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
