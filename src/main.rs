//! gpufetch - read-only NVIDIA GPU telemetry tool
//!
//! A command-line tool for querying NVIDIA GPU count, names, temperatures,
//! fan speeds and persistence mode.

use clap::Parser;
use gpufetch::cli::args::{generate_completions, Cli, Commands};
use gpufetch::commands::{run_count, run_fan, run_list, run_pm, run_status, run_temp};
use gpufetch::config::ConfigBuilder;
use gpufetch::error::{AppError, BackendError, FetchError};
use gpufetch::fetcher::build_fetcher;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    let config = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true))
        .with_backend(cli.backend)
        .with_smi_path(cli.smi_path.clone())
        .with_timeout_ms(cli.timeout_ms)
        .build()?;

    // Initialize logging once the verbose setting is known; RUST_LOG still wins
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.general.log_filter()),
    )
    .format_timestamp(None)
    .init();

    let fetcher = build_fetcher(&config.backend)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Count => run_count(fetcher.as_ref(), &mut out, cli.format),

        Commands::List => run_list(fetcher.as_ref(), &mut out, cli.format, cli.gpu),

        Commands::Temp => run_temp(fetcher.as_ref(), &mut out, cli.format, cli.gpu),

        Commands::Fan => run_fan(fetcher.as_ref(), &mut out, cli.format, cli.gpu),

        Commands::Pm => run_pm(fetcher.as_ref(), &mut out, cli.format, cli.gpu),

        Commands::Status => run_status(fetcher.as_ref(), &mut out, cli.format, cli.gpu),

        Commands::Completions { .. } => Ok(()),
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Fetch(FetchError::Backend(BackendError::NotFound { .. })) => {
            eprintln!();
            eprintln!("Hint: Make sure the NVIDIA driver is installed.");
            eprintln!("      On Linux, install the nvidia-utils package or pass --smi-path.");
        }
        AppError::Fetch(FetchError::Backend(BackendError::TimedOut { .. })) => {
            eprintln!();
            eprintln!("Hint: The driver stack is not responding.");
            eprintln!("      Raise --timeout-ms or check 'dmesg' for Xid errors.");
        }
        AppError::Fetch(FetchError::Backend(BackendError::NonZeroExit { .. })) => {
            eprintln!();
            eprintln!("Hint: Check that the selected --gpu slot exists ('gpufetch count').");
        }
        AppError::NoGpusFound => {
            eprintln!();
            eprintln!("Hint: Make sure you have an NVIDIA GPU installed.");
            eprintln!("      Check 'nvidia-smi' for GPU detection.");
        }
        _ => {}
    }
}
