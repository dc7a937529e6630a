//! Domain models for gpufetch
//!
//! Typed telemetry values returned by the fetchers.
//! Types are validated on construction (fail-fast pattern).

pub mod fan;
pub mod gpu;
pub mod metric;
pub mod persistence;
pub mod thermal;

pub use fan::FanSpeed;
pub use gpu::GpuInfo;
pub use metric::Metric;
pub use persistence::PersistenceMode;
pub use thermal::Temperature;
