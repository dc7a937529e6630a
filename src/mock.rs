//! Mock implementations for testing
//!
//! Provides a mock fetcher and a scripted command executor for unit testing
//! without real hardware.

use crate::domain::{FanSpeed, GpuInfo, Metric, PersistenceMode, Temperature};
use crate::error::{BackendError, FetchError, ParseError};
use crate::executor::{CommandExecutor, CommandLine};
use crate::fetcher::GpuDataFetcher;

use std::collections::HashMap;
use std::sync::Mutex;

/// Mock GPU state
#[derive(Debug, Clone)]
pub struct MockGpu {
    name: String,
    temperature: Temperature,
    fan_speed: Option<FanSpeed>,
    persistence_mode: PersistenceMode,
    failing: bool,
}

impl MockGpu {
    /// Create a mock GPU with default readings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temperature: Temperature::new(45),
            fan_speed: FanSpeed::new(30).ok(),
            persistence_mode: PersistenceMode::Disabled,
            failing: false,
        }
    }

    /// Builder: set temperature
    pub fn with_temperature(mut self, celsius: i32) -> Self {
        self.temperature = Temperature::new(celsius);
        self
    }

    /// Builder: set fan speed
    pub fn with_fan_speed(mut self, speed: FanSpeed) -> Self {
        self.fan_speed = Some(speed);
        self
    }

    /// Builder: GPU without a readable fan (passively cooled boards)
    pub fn without_fan(mut self) -> Self {
        self.fan_speed = None;
        self
    }

    /// Builder: set persistence mode
    pub fn with_persistence_mode(mut self, mode: PersistenceMode) -> Self {
        self.persistence_mode = mode;
        self
    }

    /// Builder: every query on this GPU fails with a backend error
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }
}

/// Mock fetcher for testing
#[derive(Debug, Default)]
pub struct MockFetcher {
    gpus: Vec<MockGpu>,
    unavailable: bool,
}

impl MockFetcher {
    /// Create a mock fetcher with the specified number of GPUs
    pub fn new(count: u32) -> Self {
        let gpus = (0..count)
            .map(|i| MockGpu::new(format!("Mock GPU {}", i)))
            .collect();
        Self::with_gpus(gpus)
    }

    /// Create a mock fetcher with custom GPUs
    pub fn with_gpus(gpus: Vec<MockGpu>) -> Self {
        Self {
            gpus,
            unavailable: false,
        }
    }

    /// A fetcher whose backend tool is missing
    pub fn unavailable() -> Self {
        Self {
            gpus: Vec::new(),
            unavailable: true,
        }
    }

    fn missing_tool() -> FetchError {
        BackendError::NotFound {
            program: "nvidia-smi".to_string(),
        }
        .into()
    }

    fn gpu(&self, slot: u32) -> Result<&MockGpu, FetchError> {
        if self.unavailable {
            return Err(Self::missing_tool());
        }

        let gpu = self
            .gpus
            .get(slot as usize)
            .ok_or_else(|| BackendError::NonZeroExit {
                command: format!("nvidia-smi -i {}", slot),
                code: Some(6),
                stderr: "No devices were found".to_string(),
            })?;

        if gpu.failing {
            return Err(BackendError::NonZeroExit {
                command: format!("nvidia-smi -i {}", slot),
                code: Some(15),
                stderr: "GPU is lost".to_string(),
            }
            .into());
        }

        Ok(gpu)
    }
}

impl GpuDataFetcher for MockFetcher {
    fn backend_name(&self) -> &'static str {
        "mock"
    }

    fn gpu_count(&self) -> Result<u32, FetchError> {
        if self.unavailable {
            return Err(Self::missing_tool());
        }
        Ok(self.gpus.len() as u32)
    }

    fn gpu_info(&self, slot: u32) -> Result<GpuInfo, FetchError> {
        let gpu = self.gpu(slot)?;
        Ok(GpuInfo::new(slot, gpu.name.clone()))
    }

    fn gpu_temperature(&self, slot: u32) -> Result<Temperature, FetchError> {
        Ok(self.gpu(slot)?.temperature)
    }

    fn gpu_fan_speed(&self, slot: u32) -> Result<FanSpeed, FetchError> {
        self.gpu(slot)?.fan_speed.ok_or_else(|| {
            ParseError::Unavailable {
                metric: Metric::FanSpeed,
                raw: "[N/A]".to_string(),
            }
            .into()
        })
    }

    fn gpu_persistence_mode(&self, slot: u32) -> Result<PersistenceMode, FetchError> {
        Ok(self.gpu(slot)?.persistence_mode)
    }
}

type FailureFn = Box<dyn Fn() -> BackendError + Send + Sync>;

/// Command executor answering from a script of canned outputs
///
/// Commands are matched on their rendered form. Unknown commands fail with a
/// non-zero exit, the way `nvidia-smi` rejects an unknown slot.
#[derive(Default)]
pub struct MockExecutor {
    responses: HashMap<String, String>,
    failure: Option<FailureFn>,
    calls: Mutex<Vec<String>>,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: answer `command` with `stdout`
    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.responses
            .insert(command.to_string(), stdout.to_string());
        self
    }

    /// Builder: fail every command with the error produced by `failure`
    pub fn fail_all<F>(mut self, failure: F) -> Self
    where
        F: Fn() -> BackendError + Send + Sync + 'static,
    {
        self.failure = Some(Box::new(failure));
        self
    }

    /// Rendered commands received so far
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&self, command: &CommandLine) -> Result<String, BackendError> {
        let rendered = command.to_string();
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(rendered.clone());
        }

        if let Some(failure) = &self.failure {
            return Err(failure());
        }

        self.responses
            .get(&rendered)
            .cloned()
            .ok_or(BackendError::NonZeroExit {
                command: rendered,
                code: Some(6),
                stderr: "No devices were found".to_string(),
            })
    }
}
