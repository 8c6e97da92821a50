//! Environment-driven configuration for hosts of the conference store.
//!
//! Recognized variables:
//! - `CONFITA_DB_PATH`: SQLite file path. Unset means the caller decides.
//! - `CONFITA_LOG_LEVEL`: `trace|debug|info|warn|error`.
//! - `CONFITA_LOG_DIR`: absolute directory for rolling logs. Unset disables
//!   file logging.

use crate::logging::{default_log_level, init_logging, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "CONFITA_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "CONFITA_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CONFITA_LOG_DIR";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, treating blank values as unset.
    ///
    /// # Errors
    /// - The log level variable holds an unsupported level.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_level = match read(LOG_LEVEL_VAR) {
            Some(level) => normalize_level(&level)?.to_string(),
            None => default_log_level().to_string(),
        };

        Ok(Self {
            db_path: read(DB_PATH_VAR).map(PathBuf::from),
            log_level,
            log_dir: read(LOG_DIR_VAR).map(PathBuf::from),
        })
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when no directory is set and logging stays off.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: {}", log_dir.display()))?;
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }
}
