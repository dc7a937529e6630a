//! Single-metric command implementations
//!
//! `temp`, `fan` and `pm` each query one metric for the selected GPUs.
//! The first failure aborts the command before anything is written.

use crate::cli::args::OutputFormat;
use crate::cli::output::{
    write_output, FanSpeedReading, PersistenceReading, Readings, TemperatureReading,
};
use crate::commands::target_slots;
use crate::error::Result;
use crate::fetcher::GpuDataFetcher;

use std::io::Write;

/// Execute the temp command
pub fn run_temp<W: Write>(
    fetcher: &dyn GpuDataFetcher,
    out: &mut W,
    format: OutputFormat,
    gpu: Option<u32>,
) -> Result<()> {
    let readings = target_slots(fetcher, gpu)?
        .into_iter()
        .map(|slot| {
            fetcher
                .gpu_temperature(slot)
                .map(|temp| TemperatureReading::new(slot, temp))
        })
        .collect::<std::result::Result<Readings<_>, _>>()?;

    write_output(out, &readings, format)?;
    Ok(())
}

/// Execute the fan command
pub fn run_fan<W: Write>(
    fetcher: &dyn GpuDataFetcher,
    out: &mut W,
    format: OutputFormat,
    gpu: Option<u32>,
) -> Result<()> {
    let readings = target_slots(fetcher, gpu)?
        .into_iter()
        .map(|slot| {
            fetcher
                .gpu_fan_speed(slot)
                .map(|speed| FanSpeedReading::new(slot, speed))
        })
        .collect::<std::result::Result<Readings<_>, _>>()?;

    write_output(out, &readings, format)?;
    Ok(())
}

/// Execute the pm command
pub fn run_pm<W: Write>(
    fetcher: &dyn GpuDataFetcher,
    out: &mut W,
    format: OutputFormat,
    gpu: Option<u32>,
) -> Result<()> {
    let readings = target_slots(fetcher, gpu)?
        .into_iter()
        .map(|slot| {
            fetcher
                .gpu_persistence_mode(slot)
                .map(|mode| PersistenceReading::new(slot, mode))
        })
        .collect::<std::result::Result<Readings<_>, _>>()?;

    write_output(out, &readings, format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PersistenceMode;
    use crate::error::AppError;
    use crate::mock::{MockFetcher, MockGpu};

    fn fetcher() -> MockFetcher {
        MockFetcher::with_gpus(vec![
            MockGpu::new("Tesla T4")
                .with_temperature(38)
                .without_fan()
                .with_persistence_mode(PersistenceMode::Enabled),
            MockGpu::new("NVIDIA GeForce RTX 3080").with_temperature(67),
        ])
    }

    #[test]
    fn test_run_temp_all() {
        let mut out = Vec::new();
        run_temp(&fetcher(), &mut out, OutputFormat::Table, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[0] Temperature: 38°C\n[1] Temperature: 67°C\n"
        );
    }

    #[test]
    fn test_run_fan_passive_gpu_fails() {
        let mut out = Vec::new();
        let err = run_fan(&fetcher(), &mut out, OutputFormat::Table, Some(0)).unwrap_err();
        assert!(matches!(err, AppError::Fetch(ref e) if e.is_parse()));
    }

    #[test]
    fn test_run_fan_single() {
        let mut out = Vec::new();
        run_fan(&fetcher(), &mut out, OutputFormat::Compact, Some(1)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "1:30\n");
    }

    #[test]
    fn test_run_pm_json() {
        let mut out = Vec::new();
        run_pm(&fetcher(), &mut out, OutputFormat::Json, Some(0)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["enabled"], true);
    }

    #[test]
    fn test_run_temp_json_is_one_array() {
        let mut out = Vec::new();
        run_temp(&fetcher(), &mut out, OutputFormat::Json, None).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        let readings = value.as_array().unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0]["celsius"], 38);
        assert_eq!(readings[1]["gpu_index"], 1);
    }

    #[test]
    fn test_run_fan_failure_writes_nothing() {
        let mut out = Vec::new();
        assert!(run_fan(&fetcher(), &mut out, OutputFormat::Table, None).is_err());
        assert!(out.is_empty());
    }
}
