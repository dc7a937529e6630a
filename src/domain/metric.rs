//! Telemetry metric identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// One queryable GPU metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Number of attached devices (machine-global)
    Count,
    /// Device name
    Name,
    /// Core temperature in Celsius
    Temperature,
    /// Fan speed in percent
    FanSpeed,
    /// Driver persistence mode
    PersistenceMode,
}

impl Metric {
    /// Whether the metric is queried per GPU slot
    pub fn is_per_slot(&self) -> bool {
        !matches!(self, Metric::Count)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Metric::Count => "GPU count",
            Metric::Name => "GPU name",
            Metric::Temperature => "temperature",
            Metric::FanSpeed => "fan speed",
            Metric::PersistenceMode => "persistence mode",
        };
        f.write_str(label)
    }
}
