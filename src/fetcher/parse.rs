//! Parsing of `nvidia-smi` CSV values
//!
//! Queries are built to return one bare value per line, so parsing reduces to
//! picking the value, trimming it and casting it to the metric's type.

use crate::domain::{FanSpeed, Metric, PersistenceMode, Temperature};
use crate::error::ParseError;

/// Placeholders nvidia-smi prints instead of a value
const UNAVAILABLE_MARKERS: &[&str] = &["[N/A]", "N/A", "[Not Supported]", "[Unknown Error]"];

/// Extract the trimmed value from raw tool output
///
/// Takes the first non-empty line: `--query-gpu=count` repeats the total once
/// per device and per-slot queries print exactly one line.
pub fn extract_value(metric: Metric, raw: &str) -> Result<&str, ParseError> {
    let value = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(ParseError::Empty { metric })?;

    if UNAVAILABLE_MARKERS
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
    {
        return Err(ParseError::Unavailable {
            metric,
            raw: value.to_string(),
        });
    }

    Ok(value)
}

fn parse_integer(metric: Metric, raw: &str) -> Result<i64, ParseError> {
    let value = extract_value(metric, raw)?;
    value.parse::<i64>().map_err(|_| ParseError::InvalidInteger {
        metric,
        raw: value.to_string(),
    })
}

/// Parse a device count
pub fn parse_count(raw: &str) -> Result<u32, ParseError> {
    let value = parse_integer(Metric::Count, raw)?;
    u32::try_from(value).map_err(|_| ParseError::OutOfRange {
        metric: Metric::Count,
        value,
    })
}

/// Parse a device name
pub fn parse_name(raw: &str) -> Result<String, ParseError> {
    extract_value(Metric::Name, raw).map(str::to_string)
}

/// Parse a core temperature in Celsius
pub fn parse_temperature(raw: &str) -> Result<Temperature, ParseError> {
    let value = parse_integer(Metric::Temperature, raw)?;
    i32::try_from(value)
        .map(Temperature::new)
        .map_err(|_| ParseError::OutOfRange {
            metric: Metric::Temperature,
            value,
        })
}

/// Parse a fan speed percentage
pub fn parse_fan_speed(raw: &str) -> Result<FanSpeed, ParseError> {
    let value = parse_integer(Metric::FanSpeed, raw)?;
    u8::try_from(value)
        .ok()
        .and_then(|v| FanSpeed::new(v).ok())
        .ok_or(ParseError::OutOfRange {
            metric: Metric::FanSpeed,
            value,
        })
}

/// Parse a persistence mode status
pub fn parse_persistence_mode(raw: &str) -> Result<PersistenceMode, ParseError> {
    extract_value(Metric::PersistenceMode, raw)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("2\n"), Ok(2));
        assert_eq!(parse_count("0\n"), Ok(0));
    }

    #[test]
    fn test_parse_count_repeated_per_device() {
        assert_eq!(parse_count("4\n4\n4\n4\n"), Ok(4));
    }

    #[test]
    fn test_parse_count_rejects_garbage() {
        assert_eq!(
            parse_count("NVIDIA-SMI has failed\n"),
            Err(ParseError::InvalidInteger {
                metric: Metric::Count,
                raw: "NVIDIA-SMI has failed".to_string()
            })
        );
        assert_eq!(
            parse_count("-1\n"),
            Err(ParseError::OutOfRange {
                metric: Metric::Count,
                value: -1
            })
        );
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(
            parse_count("  \n\n"),
            Err(ParseError::Empty {
                metric: Metric::Count
            })
        );
        assert_eq!(
            parse_name(""),
            Err(ParseError::Empty {
                metric: Metric::Name
            })
        );
    }

    #[test]
    fn test_parse_name_trims() {
        assert_eq!(
            parse_name("NVIDIA GeForce RTX 3080  \n").unwrap(),
            "NVIDIA GeForce RTX 3080"
        );
    }

    #[test]
    fn test_parse_temperature() {
        assert_eq!(parse_temperature("67\n"), Ok(Temperature::new(67)));
        assert!(matches!(
            parse_temperature("67 C\n"),
            Err(ParseError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_parse_fan_speed() {
        assert_eq!(parse_fan_speed(" 45\n").unwrap().as_percentage(), 45);
        assert_eq!(
            parse_fan_speed("130\n"),
            Err(ParseError::OutOfRange {
                metric: Metric::FanSpeed,
                value: 130
            })
        );
    }

    #[test]
    fn test_fan_speed_not_supported() {
        assert_eq!(
            parse_fan_speed("[N/A]\n"),
            Err(ParseError::Unavailable {
                metric: Metric::FanSpeed,
                raw: "[N/A]".to_string()
            })
        );
        assert!(matches!(
            parse_fan_speed("[Not Supported]\n"),
            Err(ParseError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_parse_persistence_mode() {
        assert_eq!(
            parse_persistence_mode("Enabled\n"),
            Ok(PersistenceMode::Enabled)
        );
        assert_eq!(
            parse_persistence_mode("Disabled"),
            Ok(PersistenceMode::Disabled)
        );
        assert!(matches!(
            parse_persistence_mode("maybe\n"),
            Err(ParseError::InvalidPersistenceMode { .. })
        ));
    }
}
