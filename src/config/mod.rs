//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::error::ConfigError;
use crate::executor::DEFAULT_TIMEOUT;
use crate::fetcher::smi::DEFAULT_SMI_PROGRAM;
use crate::fetcher::BackendKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Telemetry backend settings
    pub backend: FetcherConfig,
}

impl Config {
    /// Check values that serde cannot validate on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()
    }
}

/// General configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
}

impl GeneralConfig {
    /// Default env_logger filter for this verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Telemetry backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Which backend answers queries
    pub kind: BackendKind,
    /// Path or name of the nvidia-smi binary
    pub smi_path: String,
    /// Maximum run time of one backend command in milliseconds
    pub timeout_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            smi_path: DEFAULT_SMI_PROGRAM.to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
        }
    }
}

impl FetcherConfig {
    /// Command timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "backend.timeout_ms".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if self.smi_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "backend.smi_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
