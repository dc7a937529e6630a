//! GPU identity domain type
//!
//! Provides the GpuInfo struct pairing a slot with the device name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GPU identification: slot index and marketing name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GpuInfo {
    /// GPU slot (0-based)
    pub index: u32,
    /// GPU name (e.g., "NVIDIA GeForce RTX 3080")
    pub name: String,
}

impl GpuInfo {
    /// Create new GPU info
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

impl fmt::Display for GpuInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.index, self.name)
    }
}

impl From<GpuInfo> for (u32, String) {
    fn from(info: GpuInfo) -> Self {
        (info.index, info.name)
    }
}
