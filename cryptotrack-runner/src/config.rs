//! Tracker configuration.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) yields a working tracker. CLI flags override afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cryptotrack_core::data::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Runtime parameters for the poll loop and its outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// Wait after a completed cycle or a fetch failure.
    pub update_interval_secs: u64,

    /// Wait after an unexpected failure.
    pub retry_backoff_secs: u64,

    pub spreadsheet_path: PathBuf,

    pub report_path: PathBuf,

    /// Optional CSV copy of the spreadsheet table.
    pub csv_path: Option<PathBuf>,

    pub api_base_url: String,

    pub request_timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            update_interval_secs: 300,
            retry_backoff_secs: 60,
            spreadsheet_path: PathBuf::from("crypto_data.xlsx"),
            report_path: PathBuf::from("analysis_report.md"),
            csv_path: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl TrackerConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "update_interval_secs must be positive".into(),
            ));
        }
        if self.retry_backoff_secs == 0 {
            return Err(ConfigError::Invalid(
                "retry_backoff_secs must be positive".into(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".into(),
            ));
        }
        if self.spreadsheet_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("spreadsheet_path is empty".into()));
        }
        if self.report_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("report_path is empty".into()));
        }
        if matches!(&self.csv_path, Some(p) if p.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("csv_path is empty".into()));
        }
        Ok(())
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
