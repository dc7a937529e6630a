//! gpufetch - read-only NVIDIA GPU telemetry library
//!
//! This library queries GPU count, identity, temperature, fan speed and
//! persistence mode through swappable backends: the `nvidia-smi`
//! command-line tool or, with the `nvml` feature, the NVML library.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Typed telemetry values
//! - [`error`]: Error types
//! - [`executor`]: Child process execution with timeouts
//! - [`fetcher`]: The `GpuDataFetcher` trait and its backends

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod executor;
pub mod fetcher;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, BackendError, FetchError, ParseError, Result};
pub use fetcher::{build_fetcher, BackendKind, GpuDataFetcher, SmiFetcher};
