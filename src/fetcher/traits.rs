//! Trait definitions for GPU telemetry
//!
//! These traits abstract over the telemetry backend so callers and tests
//! can swap `nvidia-smi`, NVML or a mock without changing code.

use crate::domain::{FanSpeed, GpuInfo, PersistenceMode, Temperature};
use crate::error::FetchError;

/// Read-only GPU telemetry source
///
/// Every call is synchronous and independent: nothing is cached and nothing
/// is retried. Slot indices are not checked against `gpu_count()`; a slot
/// the backend rejects surfaces as a backend error.
pub trait GpuDataFetcher: Send + Sync {
    /// Short name of the backend, used in logs
    fn backend_name(&self) -> &'static str;

    /// Get the number of attached GPU devices
    fn gpu_count(&self) -> Result<u32, FetchError>;

    /// Get the identity (slot and name) of the GPU in `slot`
    fn gpu_info(&self, slot: u32) -> Result<GpuInfo, FetchError>;

    /// Get the core temperature of the GPU in `slot`
    fn gpu_temperature(&self, slot: u32) -> Result<Temperature, FetchError>;

    /// Get the fan speed of the GPU in `slot`
    fn gpu_fan_speed(&self, slot: u32) -> Result<FanSpeed, FetchError>;

    /// Get the persistence mode of the GPU in `slot`
    fn gpu_persistence_mode(&self, slot: u32) -> Result<PersistenceMode, FetchError>;

    /// Get the identity of every attached GPU
    ///
    /// Fails as a whole if any single query fails.
    fn all_gpus(&self) -> Result<Vec<GpuInfo>, FetchError> {
        let count = self.gpu_count()?;
        let mut gpus = Vec::with_capacity(count as usize);
        for slot in 0..count {
            gpus.push(self.gpu_info(slot)?);
        }
        Ok(gpus)
    }
}

impl<F: GpuDataFetcher + ?Sized> GpuDataFetcher for Box<F> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn gpu_count(&self) -> Result<u32, FetchError> {
        (**self).gpu_count()
    }

    fn gpu_info(&self, slot: u32) -> Result<GpuInfo, FetchError> {
        (**self).gpu_info(slot)
    }

    fn gpu_temperature(&self, slot: u32) -> Result<Temperature, FetchError> {
        (**self).gpu_temperature(slot)
    }

    fn gpu_fan_speed(&self, slot: u32) -> Result<FanSpeed, FetchError> {
        (**self).gpu_fan_speed(slot)
    }

    fn gpu_persistence_mode(&self, slot: u32) -> Result<PersistenceMode, FetchError> {
        (**self).gpu_persistence_mode(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockFetcher, MockGpu};

    #[test]
    fn test_all_gpus_slots_match() {
        let fetcher = MockFetcher::new(3);
        let gpus = fetcher.all_gpus().unwrap();
        assert_eq!(gpus.len(), 3);
        for (slot, gpu) in gpus.iter().enumerate() {
            assert_eq!(gpu.index, slot as u32);
        }
    }

    #[test]
    fn test_all_gpus_fails_as_a_whole() {
        let fetcher = MockFetcher::with_gpus(vec![
            MockGpu::new("NVIDIA GeForce RTX 3080"),
            MockGpu::new("NVIDIA GeForce RTX 3090").failing(),
        ]);
        assert!(fetcher.all_gpus().is_err());
    }

    #[test]
    fn test_boxed_fetcher_delegates() {
        let fetcher: Box<dyn GpuDataFetcher> = Box::new(MockFetcher::new(2));
        assert_eq!(fetcher.gpu_count().unwrap(), 2);
        assert_eq!(fetcher.backend_name(), "mock");
    }
}
