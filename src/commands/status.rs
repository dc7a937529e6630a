//! Status command implementation
//!
//! Shows every metric of each selected GPU. A metric that cannot be read is
//! reported as unavailable instead of failing the whole command.

use crate::cli::args::OutputFormat;
use crate::cli::output::{write_output, GpuStatus, Readings};
use crate::commands::target_slots;
use crate::error::{FetchError, Result};
use crate::fetcher::GpuDataFetcher;

use std::io::Write;

/// Execute the status command
pub fn run_status<W: Write>(
    fetcher: &dyn GpuDataFetcher,
    out: &mut W,
    format: OutputFormat,
    gpu: Option<u32>,
) -> Result<()> {
    let mut statuses = Vec::new();

    for slot in target_slots(fetcher, gpu)? {
        statuses.push(GpuStatus {
            gpu_index: slot,
            name: reading(slot, "name", fetcher.gpu_info(slot)).map(|info| info.name),
            temperature_celsius: reading(slot, "temperature", fetcher.gpu_temperature(slot))
                .map(|t| t.as_celsius()),
            fan_speed_percent: reading(slot, "fan speed", fetcher.gpu_fan_speed(slot))
                .map(|s| s.as_percentage()),
            persistence_mode: reading(
                slot,
                "persistence mode",
                fetcher.gpu_persistence_mode(slot),
            )
            .map(|m| m.is_enabled()),
        });
    }

    write_output(out, &Readings(statuses), format)?;
    Ok(())
}

fn reading<T>(slot: u32, what: &str, result: std::result::Result<T, FetchError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("GPU {}: {} unavailable: {}", slot, what, e);
            None
        }
    }
}
