// Configuration read from the environment, each value falling back to a
// default when unset.

use crate::error::{Error, Result};
use crate::time_range::DEFAULT_BASE_URL;
use log::LevelFilter;
use std::path::PathBuf;

pub const ENV_API_URL: &str = "TIMEULAR_API_URL";
pub const ENV_LOG_FILE: &str = "TIMEULAR_LOG_FILE";
pub const ENV_LOG_LEVEL: &str = "TIMEULAR_LOG_LEVEL";

/// Log file name, created in the current working directory by default.
pub const DEFAULT_LOG_FILE: &str = "timeular_log.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_LOG_FILE),
            level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim().trim_end_matches('/');
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "{} must be an http(s) URL, got {:?}",
                    ENV_API_URL, url
                )));
            }
            config.base_url = url.to_string();
        }

        if let Some(path) = lookup(ENV_LOG_FILE).filter(|p| !p.trim().is_empty()) {
            config.logging.file = PathBuf::from(path);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = level.trim().parse().map_err(|_| {
                Error::Config(format!("{} has unknown level {:?}", ENV_LOG_LEVEL, level))
            })?;
        }

        Ok(config)
    }

    /// Raise the log level one step per `-v`, never lowering it.
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        let raised = match verbose {
            0 => LevelFilter::Off,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        self.logging.level = self.logging.level.max(raised);
        self
    }
}
