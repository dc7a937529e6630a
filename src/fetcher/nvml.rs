//! NVML backed fetcher
//!
//! Queries the NVIDIA Management Library through nvml-wrapper instead of
//! spawning `nvidia-smi`. The library is loaded once at construction.

use crate::domain::{FanSpeed, GpuInfo, Metric, PersistenceMode, Temperature};
use crate::error::{BackendError, FetchError, ParseError};
use crate::fetcher::traits::GpuDataFetcher;

use nvml_wrapper::enum_wrappers::device::TemperatureSensor;
use nvml_wrapper::error::NvmlError as LibError;
use nvml_wrapper::{Device, Nvml};

/// Fetcher backed by the NVML library
pub struct NvmlFetcher {
    nvml: Nvml,
}

impl NvmlFetcher {
    /// Load NVML and create a new fetcher
    pub fn new() -> Result<Self, BackendError> {
        let nvml = Nvml::init().map_err(|e| match e {
            LibError::LibloadingError(_) => BackendError::Nvml(
                "NVML library not found. Is the NVIDIA driver installed?".to_string(),
            ),
            LibError::DriverNotLoaded => {
                BackendError::Nvml("NVIDIA driver not loaded".to_string())
            }
            other => BackendError::Nvml(other.to_string()),
        })?;

        Ok(Self { nvml })
    }

    fn device(&self, slot: u32) -> Result<Device<'_>, BackendError> {
        self.nvml.device_by_index(slot).map_err(|e| match e {
            LibError::NotFound | LibError::InvalidArg => {
                BackendError::Nvml(format!("GPU device not found at index {}", slot))
            }
            other => convert_error(other),
        })
    }
}

fn convert_error(err: LibError) -> BackendError {
    match err {
        LibError::NotSupported => {
            BackendError::Nvml("Operation not supported by this GPU".to_string())
        }
        LibError::NoPermission => BackendError::Nvml("Insufficient permissions".to_string()),
        LibError::GpuLost => {
            BackendError::Nvml("GPU is lost or has become inaccessible".to_string())
        }
        other => BackendError::Nvml(other.to_string()),
    }
}

impl GpuDataFetcher for NvmlFetcher {
    fn backend_name(&self) -> &'static str {
        "nvml"
    }

    fn gpu_count(&self) -> Result<u32, FetchError> {
        Ok(self.nvml.device_count().map_err(convert_error)?)
    }

    fn gpu_info(&self, slot: u32) -> Result<GpuInfo, FetchError> {
        let name = self.device(slot)?.name().map_err(convert_error)?;
        Ok(GpuInfo::new(slot, name.trim()))
    }

    fn gpu_temperature(&self, slot: u32) -> Result<Temperature, FetchError> {
        let temp = self
            .device(slot)?
            .temperature(TemperatureSensor::Gpu)
            .map_err(convert_error)?;
        Ok(Temperature::from(temp))
    }

    fn gpu_fan_speed(&self, slot: u32) -> Result<FanSpeed, FetchError> {
        // nvidia-smi's fan.speed reports the first fan as well
        let speed = self.device(slot)?.fan_speed(0).map_err(convert_error)?;
        let out_of_range = ParseError::OutOfRange {
            metric: Metric::FanSpeed,
            value: i64::from(speed),
        };
        let speed = u8::try_from(speed).map_err(|_| out_of_range.clone())?;
        Ok(FanSpeed::new(speed).map_err(|_| out_of_range)?)
    }

    fn gpu_persistence_mode(&self, slot: u32) -> Result<PersistenceMode, FetchError> {
        let enabled = self
            .device(slot)?
            .is_in_persistent_mode()
            .map_err(convert_error)?;
        Ok(PersistenceMode::from(enabled))
    }
}
