//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI commands.

use crate::cli::args::OutputFormat;
use crate::domain::{FanSpeed, GpuInfo, PersistenceMode, Temperature};
use serde::Serialize;
use std::io::{self, Write};

const UNAVAILABLE: &str = "unavailable";

/// Format output into any writer
pub fn write_output<W: Write, T: Serialize + TableDisplay>(
    out: &mut W,
    data: &T,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(out, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Readings of several GPUs written as one document
///
/// JSON output is a single array rather than one object per GPU.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Readings<T>(pub Vec<T>);

impl<T: TableDisplay> TableDisplay for Readings<T> {
    fn to_table(&self) -> String {
        self.0
            .iter()
            .map(TableDisplay::to_table)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(TableDisplay::to_compact)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<T> FromIterator<T> for Readings<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Temperature with a warning suffix once it runs hot
fn temperature_label(temp: Temperature) -> String {
    if temp.is_critical() {
        format!("{} (critical)", temp)
    } else if temp.is_high() {
        format!("{} (high)", temp)
    } else {
        temp.to_string()
    }
}

/// GPU count for display
#[derive(Debug, Clone, Serialize)]
pub struct GpuCount {
    pub count: u32,
}

impl TableDisplay for GpuCount {
    fn to_table(&self) -> String {
        format!("GPUs Found: {}", self.count)
    }

    fn to_compact(&self) -> String {
        self.count.to_string()
    }
}

/// GPU list entry for display
#[derive(Debug, Clone, Serialize)]
pub struct GpuListEntry {
    pub index: u32,
    pub name: String,
}

impl From<&GpuInfo> for GpuListEntry {
    fn from(info: &GpuInfo) -> Self {
        Self {
            index: info.index,
            name: info.name.clone(),
        }
    }
}

impl TableDisplay for GpuListEntry {
    fn to_table(&self) -> String {
        format!("[{}] {}", self.index, self.name)
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.index, self.name)
    }
}

/// GPU list for display
#[derive(Debug, Clone, Serialize)]
pub struct GpuList {
    pub gpus: Vec<GpuListEntry>,
}

impl TableDisplay for GpuList {
    fn to_table(&self) -> String {
        let mut output = format!("GPUs Found: {}\n", self.gpus.len());

        for gpu in &self.gpus {
            output.push_str(&gpu.to_table());
            output.push('\n');
        }

        output
    }

    fn to_compact(&self) -> String {
        self.gpus
            .iter()
            .map(|g| g.to_compact())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Temperature reading display
#[derive(Debug, Clone, Serialize)]
pub struct TemperatureReading {
    pub gpu_index: u32,
    pub celsius: i32,
}

impl TemperatureReading {
    pub fn new(gpu_index: u32, temp: Temperature) -> Self {
        Self {
            gpu_index,
            celsius: temp.as_celsius(),
        }
    }
}

impl TableDisplay for TemperatureReading {
    fn to_table(&self) -> String {
        format!(
            "[{}] Temperature: {}",
            self.gpu_index,
            temperature_label(Temperature::new(self.celsius))
        )
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.gpu_index, self.celsius)
    }
}

/// Fan speed reading display
#[derive(Debug, Clone, Serialize)]
pub struct FanSpeedReading {
    pub gpu_index: u32,
    pub percent: u8,
}

impl FanSpeedReading {
    pub fn new(gpu_index: u32, speed: FanSpeed) -> Self {
        Self {
            gpu_index,
            percent: speed.as_percentage(),
        }
    }
}

impl TableDisplay for FanSpeedReading {
    fn to_table(&self) -> String {
        format!("[{}] Fan Speed: {}%", self.gpu_index, self.percent)
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.gpu_index, self.percent)
    }
}

/// Persistence mode reading display
#[derive(Debug, Clone, Serialize)]
pub struct PersistenceReading {
    pub gpu_index: u32,
    pub enabled: bool,
}

impl PersistenceReading {
    pub fn new(gpu_index: u32, mode: PersistenceMode) -> Self {
        Self {
            gpu_index,
            enabled: mode.is_enabled(),
        }
    }
}

impl TableDisplay for PersistenceReading {
    fn to_table(&self) -> String {
        format!(
            "[{}] Persistence Mode: {}",
            self.gpu_index,
            PersistenceMode::from(self.enabled)
        )
    }

    fn to_compact(&self) -> String {
        format!("{}:{}", self.gpu_index, self.enabled)
    }
}

/// Every metric of one GPU; `None` marks a metric that could not be read
#[derive(Debug, Clone, Default, Serialize)]
pub struct GpuStatus {
    pub gpu_index: u32,
    pub name: Option<String>,
    pub temperature_celsius: Option<i32>,
    pub fan_speed_percent: Option<u8>,
    pub persistence_mode: Option<bool>,
}

fn or_unavailable<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

impl TableDisplay for GpuStatus {
    fn to_table(&self) -> String {
        let temperature = self
            .temperature_celsius
            .map(|c| temperature_label(Temperature::new(c)));

        format!(
            "[{}] {}\n  Temperature: {}\n  Fan Speed: {}\n  Persistence Mode: {}",
            self.gpu_index,
            self.name.as_deref().unwrap_or(UNAVAILABLE),
            or_unavailable(temperature),
            or_unavailable(self.fan_speed_percent.map(|p| format!("{}%", p))),
            or_unavailable(self.persistence_mode.map(PersistenceMode::from)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_output(&mut buf, data, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_gpu_list_table() {
        let list = GpuList {
            gpus: vec![
                GpuListEntry::from(&GpuInfo::new(0, "NVIDIA GeForce RTX 3080")),
                GpuListEntry::from(&GpuInfo::new(1, "Tesla T4")),
            ],
        };

        assert_eq!(
            render(&list, OutputFormat::Table),
            "GPUs Found: 2\n[0] NVIDIA GeForce RTX 3080\n[1] Tesla T4\n\n"
        );
        assert_eq!(
            render(&list, OutputFormat::Compact),
            "0:NVIDIA GeForce RTX 3080, 1:Tesla T4\n"
        );
    }

    #[test]
    fn test_count_json() {
        let json = render(&GpuCount { count: 2 }, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 2);
    }

    #[test]
    fn test_readings_table() {
        let temp = TemperatureReading::new(0, Temperature::new(67));
        assert_eq!(temp.to_table(), "[0] Temperature: 67°C");

        let pm = PersistenceReading::new(1, PersistenceMode::Enabled);
        assert_eq!(pm.to_table(), "[1] Persistence Mode: Enabled");
        assert_eq!(pm.to_compact(), "1:true");
    }

    #[test]
    fn test_temperature_warning_labels() {
        assert_eq!(
            TemperatureReading::new(0, Temperature::new(84)).to_table(),
            "[0] Temperature: 84°C (high)"
        );
        assert_eq!(
            TemperatureReading::new(1, Temperature::new(93)).to_table(),
            "[1] Temperature: 93°C (critical)"
        );
        // Compact and JSON output stay numeric
        assert_eq!(
            TemperatureReading::new(1, Temperature::new(93)).to_compact(),
            "1:93"
        );

        let status = GpuStatus {
            gpu_index: 0,
            temperature_celsius: Some(91),
            ..GpuStatus::default()
        };
        assert!(status.to_table().contains("Temperature: 91°C (critical)"));
    }

    #[test]
    fn test_readings_json_is_one_array() {
        let readings: Readings<_> = [(0, 38), (1, 67)]
            .into_iter()
            .map(|(slot, c)| TemperatureReading::new(slot, Temperature::new(c)))
            .collect();

        let value: serde_json::Value =
            serde_json::from_str(&render(&readings, OutputFormat::Json)).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["gpu_index"], 1);
        assert_eq!(items[1]["celsius"], 67);

        assert_eq!(
            render(&readings, OutputFormat::Table),
            "[0] Temperature: 38°C\n[1] Temperature: 67°C\n"
        );
        assert_eq!(render(&readings, OutputFormat::Compact), "0:38, 1:67\n");
    }

    #[test]
    fn test_status_marks_unavailable() {
        let status = GpuStatus {
            gpu_index: 0,
            name: Some("Tesla T4".to_string()),
            temperature_celsius: Some(41),
            fan_speed_percent: None,
            persistence_mode: Some(true),
        };

        let table = status.to_table();
        assert!(table.contains("Temperature: 41°C"));
        assert!(table.contains("Fan Speed: unavailable"));
        assert!(table.contains("Persistence Mode: Enabled"));
    }

    #[test]
    fn test_status_json_uses_null() {
        let status = GpuStatus {
            gpu_index: 3,
            ..GpuStatus::default()
        };
        let value: serde_json::Value =
            serde_json::from_str(&render(&status, OutputFormat::Json)).unwrap();
        assert!(value["temperature_celsius"].is_null());
        assert_eq!(value["gpu_index"], 3);
    }
}
