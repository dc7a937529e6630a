//! Unified error types for gpufetch
//!
//! This module defines all error types used throughout the crate.
//! Uses thiserror for ergonomic error definitions.

use crate::domain::Metric;
use std::time::Duration;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a telemetry query
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from domain type validation
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    /// No GPUs reported by the backend
    #[error("No NVIDIA GPUs detected")]
    NoGpusFound,

    /// IO error (writing output)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned by every `GpuDataFetcher` operation
#[derive(Error, Debug)]
pub enum FetchError {
    /// The backend tool or library failed
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// The backend answered but the value could not be interpreted
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl FetchError {
    /// Whether the failure came from the backend itself
    pub fn is_backend(&self) -> bool {
        matches!(self, FetchError::Backend(_))
    }

    /// Whether the failure came from interpreting backend output
    pub fn is_parse(&self) -> bool {
        matches!(self, FetchError::Parse(_))
    }
}

/// Failures of the backend tool or library
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend executable could not be found
    #[error("'{program}' not found. Is the NVIDIA driver installed?")]
    NotFound { program: String },

    /// The backend executable could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend exited with a non-zero status
    #[error("'{command}' exited with {}: {stderr}", exit_label(.code))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The backend did not finish in time and was killed
    #[error("'{command}' timed out after {timeout:?}")]
    TimedOut { command: String, timeout: Duration },

    /// The backend wrote something that is not UTF-8
    #[error("'{command}' produced non UTF-8 output")]
    InvalidOutput { command: String },

    /// Error reported by the NVML library
    #[error("NVML error: {0}")]
    Nvml(String),

    /// The requested backend is not available in this build
    #[error("Backend not supported: {0}")]
    Unsupported(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// Failures to interpret backend output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The backend printed nothing
    #[error("Empty output for {metric}")]
    Empty { metric: Metric },

    /// The backend reported the value as unavailable
    #[error("{metric} is not available on this GPU (backend reported '{raw}')")]
    Unavailable { metric: Metric, raw: String },

    /// Output is not an integer
    #[error("Invalid {metric} value: '{raw}' is not an integer")]
    InvalidInteger { metric: Metric, raw: String },

    /// Output is an integer outside the valid range
    #[error("{metric} value {value} is out of range")]
    OutOfRange { metric: Metric, value: i64 },

    /// Output is neither "Enabled" nor "Disabled"
    #[error("Invalid persistence mode: '{raw}'")]
    InvalidPersistenceMode { raw: String },
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid fan speed value (must be 0-100)
    #[error("Invalid fan speed: {0}% (must be 0-100)")]
    InvalidFanSpeed(u8),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_display() {
        let err = DomainError::InvalidFanSpeed(150);
        assert_eq!(err.to_string(), "Invalid fan speed: 150% (must be 0-100)");
    }

    #[test]
    fn test_backend_not_found_display() {
        let err = BackendError::NotFound {
            program: "nvidia-smi".to_string(),
        };
        assert!(err.to_string().contains("nvidia-smi"));
        assert!(err.to_string().contains("NVIDIA driver"));
    }

    #[test]
    fn test_non_zero_exit_display() {
        let err = BackendError::NonZeroExit {
            command: "nvidia-smi -i 9".to_string(),
            code: Some(6),
            stderr: "No devices were found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "'nvidia-smi -i 9' exited with status 6: No devices were found"
        );

        let killed = BackendError::NonZeroExit {
            command: "nvidia-smi".to_string(),
            code: None,
            stderr: String::new(),
        };
        assert!(killed.to_string().contains("a signal"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::InvalidInteger {
            metric: Metric::Count,
            raw: "two".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid GPU count value: 'two' is not an integer"
        );
    }

    #[test]
    fn test_fetch_error_kind() {
        let backend: FetchError = BackendError::Nvml("lost".to_string()).into();
        assert!(backend.is_backend());
        assert!(!backend.is_parse());

        let parse: FetchError = ParseError::Empty {
            metric: Metric::Name,
        }
        .into();
        assert!(parse.is_parse());
    }

    #[test]
    fn test_error_conversion() {
        let fetch_err: FetchError = BackendError::Unsupported("nvml".to_string()).into();
        let app_err: AppError = fetch_err.into();
        assert!(matches!(app_err, AppError::Fetch(FetchError::Backend(_))));
    }
}
