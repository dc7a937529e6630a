//! `nvidia-smi` backed fetcher
//!
//! Real implementation of GpuDataFetcher using the `nvidia-smi` CSV query mode.

use crate::domain::{FanSpeed, GpuInfo, Metric, PersistenceMode, Temperature};
use crate::error::FetchError;
use crate::executor::{CommandExecutor, SystemExecutor};
use crate::fetcher::parse;
use crate::fetcher::query::SmiQuery;
use crate::fetcher::traits::GpuDataFetcher;

/// Default `nvidia-smi` binary, resolved through `PATH`
pub const DEFAULT_SMI_PROGRAM: &str = "nvidia-smi";

/// Fetcher that invokes `nvidia-smi` once per metric
#[derive(Debug, Clone)]
pub struct SmiFetcher<E: CommandExecutor = SystemExecutor> {
    program: String,
    executor: E,
}

impl SmiFetcher<SystemExecutor> {
    /// Create a fetcher using `nvidia-smi` from `PATH` and the default timeout
    pub fn new() -> Self {
        Self::with_executor(SystemExecutor::default())
    }
}

impl Default for SmiFetcher<SystemExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CommandExecutor> SmiFetcher<E> {
    /// Create a fetcher that runs commands through `executor`
    pub fn with_executor(executor: E) -> Self {
        Self {
            program: DEFAULT_SMI_PROGRAM.to_string(),
            executor,
        }
    }

    /// Use a specific `nvidia-smi` binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    fn run(&self, query: SmiQuery) -> Result<String, FetchError> {
        let command = query.command_line(&self.program);
        let output = self.executor.execute(&command)?;
        log::trace!("`{}` -> {:?}", command, output);
        Ok(output)
    }
}

impl<E: CommandExecutor> GpuDataFetcher for SmiFetcher<E> {
    fn backend_name(&self) -> &'static str {
        "nvidia-smi"
    }

    fn gpu_count(&self) -> Result<u32, FetchError> {
        let output = self.run(SmiQuery::count())?;
        Ok(parse::parse_count(&output)?)
    }

    fn gpu_info(&self, slot: u32) -> Result<GpuInfo, FetchError> {
        let output = self.run(SmiQuery::for_slot(Metric::Name, slot))?;
        let name = parse::parse_name(&output)?;
        Ok(GpuInfo::new(slot, name))
    }

    fn gpu_temperature(&self, slot: u32) -> Result<Temperature, FetchError> {
        let output = self.run(SmiQuery::for_slot(Metric::Temperature, slot))?;
        Ok(parse::parse_temperature(&output)?)
    }

    fn gpu_fan_speed(&self, slot: u32) -> Result<FanSpeed, FetchError> {
        let output = self.run(SmiQuery::for_slot(Metric::FanSpeed, slot))?;
        Ok(parse::parse_fan_speed(&output)?)
    }

    fn gpu_persistence_mode(&self, slot: u32) -> Result<PersistenceMode, FetchError> {
        let output = self.run(SmiQuery::for_slot(Metric::PersistenceMode, slot))?;
        Ok(parse::parse_persistence_mode(&output)?)
    }
}
