//! Persistence mode domain type
//!
//! Persistence mode keeps the driver loaded while no client holds the device.

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Driver persistence mode of a GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistenceMode {
    Enabled,
    Disabled,
}

impl PersistenceMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, PersistenceMode::Enabled)
    }
}

impl fmt::Display for PersistenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceMode::Enabled => write!(f, "Enabled"),
            PersistenceMode::Disabled => write!(f, "Disabled"),
        }
    }
}

impl FromStr for PersistenceMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("enabled") {
            Ok(PersistenceMode::Enabled)
        } else if value.eq_ignore_ascii_case("disabled") {
            Ok(PersistenceMode::Disabled)
        } else {
            Err(ParseError::InvalidPersistenceMode {
                raw: value.to_string(),
            })
        }
    }
}

impl From<bool> for PersistenceMode {
    fn from(enabled: bool) -> Self {
        if enabled {
            PersistenceMode::Enabled
        } else {
            PersistenceMode::Disabled
        }
    }
}

impl From<PersistenceMode> for bool {
    fn from(mode: PersistenceMode) -> Self {
        mode.is_enabled()
    }
}
