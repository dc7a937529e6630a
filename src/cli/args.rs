//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::fetcher::BackendKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Read-only NVIDIA GPU telemetry
///
/// Query GPU count, names, temperatures, fan speeds and persistence mode.
#[derive(Parser, Debug)]
#[command(name = "gpufetch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GPUFETCH_CONFIG")]
    pub config: Option<String>,

    /// Target GPU by slot (0-based); all GPUs when omitted
    #[arg(long, global = true)]
    pub gpu: Option<u32>,

    /// Telemetry backend
    #[arg(long, global = true, value_enum)]
    pub backend: Option<BackendKind>,

    /// Path to the nvidia-smi binary
    #[arg(long, global = true)]
    pub smi_path: Option<String>,

    /// Maximum run time of one backend command in milliseconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the number of attached GPUs
    Count,

    /// List GPU slots and names
    List,

    /// Show core temperature
    Temp,

    /// Show fan speed
    Fan,

    /// Show persistence mode
    Pm,

    /// Show every metric, marking unreadable ones as unavailable
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format for machine parsing
    Json,
    /// Compact single-line format
    Compact,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_count() {
        let args = Cli::try_parse_from(["gpufetch", "count"]).unwrap();
        assert!(matches!(args.command, Commands::Count));
        assert!(args.backend.is_none());
    }

    #[test]
    fn test_cli_parse_verbose() {
        let args = Cli::try_parse_from(["gpufetch", "-v", "list"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_parse_gpu_selection() {
        let args = Cli::try_parse_from(["gpufetch", "temp", "--gpu", "1"]).unwrap();
        assert_eq!(args.gpu, Some(1));
        assert!(matches!(args.command, Commands::Temp));
    }

    #[test]
    fn test_cli_rejects_negative_slot() {
        assert!(Cli::try_parse_from(["gpufetch", "--gpu", "-1", "fan"]).is_err());
    }

    #[test]
    fn test_cli_parse_backend_options() {
        let args = Cli::try_parse_from([
            "gpufetch",
            "--backend",
            "nvml",
            "--smi-path",
            "/opt/nvidia-smi",
            "--timeout-ms",
            "250",
            "status",
        ])
        .unwrap();

        assert_eq!(args.backend, Some(BackendKind::Nvml));
        assert_eq!(args.smi_path.as_deref(), Some("/opt/nvidia-smi"));
        assert_eq!(args.timeout_ms, Some(250));
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["gpufetch", "--timeout-ms", "0", "count"]).is_err());
    }

    #[test]
    fn test_cli_parse_format() {
        let args = Cli::try_parse_from(["gpufetch", "--format", "json", "pm"]).unwrap();
        assert!(matches!(args.format, OutputFormat::Json));
    }
}
