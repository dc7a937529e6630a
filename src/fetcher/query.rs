//! `nvidia-smi` query construction
//!
//! Each metric maps to one `--query-gpu` field and a fixed `--format` so the
//! tool prints a single bare value with no CSV header and no unit suffix.

use crate::domain::Metric;
use crate::executor::CommandLine;

/// A single `nvidia-smi --query-gpu` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmiQuery {
    metric: Metric,
    slot: Option<u32>,
}

impl SmiQuery {
    /// Machine-global device count query
    pub fn count() -> Self {
        Self {
            metric: Metric::Count,
            slot: None,
        }
    }

    /// Query `metric` for the GPU in `slot`
    ///
    /// `Metric::Count` ignores the slot since it is machine-global.
    pub fn for_slot(metric: Metric, slot: u32) -> Self {
        Self {
            metric,
            slot: metric.is_per_slot().then_some(slot),
        }
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn slot(&self) -> Option<u32> {
        self.slot
    }

    /// The `--query-gpu` field name
    pub fn field(&self) -> &'static str {
        match self.metric {
            Metric::Count => "count",
            Metric::Name => "name",
            Metric::Temperature => "temperature.gpu",
            Metric::FanSpeed => "fan.speed",
            Metric::PersistenceMode => "persistence_mode",
        }
    }

    /// The `--format` flags
    pub fn format(&self) -> &'static str {
        match self.metric {
            Metric::Count | Metric::Name | Metric::Temperature => "csv,noheader",
            Metric::FanSpeed | Metric::PersistenceMode => "csv,noheader,nounits",
        }
    }

    /// Argument vector for `nvidia-smi`
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(4);
        if let Some(slot) = self.slot {
            args.push("-i".to_string());
            args.push(slot.to_string());
        }
        args.push(format!("--query-gpu={}", self.field()));
        args.push(format!("--format={}", self.format()));
        args
    }

    /// Full command line for the given `nvidia-smi` binary
    pub fn command_line(&self, program: &str) -> CommandLine {
        CommandLine::new(program).args(self.args())
    }
}
