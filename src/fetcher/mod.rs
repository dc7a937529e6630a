//! GPU data fetchers
//!
//! A backend-agnostic `GpuDataFetcher` trait with concrete backends:
//! `nvidia-smi` (always available) and NVML (feature `nvml`).

#[cfg(feature = "nvml")]
pub mod nvml;
pub mod parse;
pub mod query;
pub mod smi;
pub mod traits;

#[cfg(feature = "nvml")]
pub use nvml::NvmlFetcher;
pub use query::SmiQuery;
pub use smi::SmiFetcher;
pub use traits::GpuDataFetcher;

use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::executor::SystemExecutor;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Available telemetry backends
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Query the `nvidia-smi` command-line tool
    #[default]
    Smi,
    /// Query the NVML library directly
    Nvml,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Smi => write!(f, "smi"),
            BackendKind::Nvml => write!(f, "nvml"),
        }
    }
}

/// Build the fetcher selected by the configuration
pub fn build_fetcher(config: &FetcherConfig) -> Result<Box<dyn GpuDataFetcher>, FetchError> {
    log::debug!("Using {} backend", config.kind);

    match config.kind {
        BackendKind::Smi => {
            let executor = SystemExecutor::new(config.timeout());
            Ok(Box::new(
                SmiFetcher::with_executor(executor).with_program(config.smi_path.clone()),
            ))
        }
        #[cfg(feature = "nvml")]
        BackendKind::Nvml => Ok(Box::new(NvmlFetcher::new()?)),
        #[cfg(not(feature = "nvml"))]
        BackendKind::Nvml => Err(crate::error::BackendError::Unsupported(
            "gpufetch was built without the `nvml` feature".to_string(),
        )
        .into()),
    }
}
