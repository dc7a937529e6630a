//! Count command implementation

use crate::cli::args::OutputFormat;
use crate::cli::output::{write_output, GpuCount};
use crate::error::Result;
use crate::fetcher::GpuDataFetcher;

use std::io::Write;

/// Execute the count command
pub fn run_count<W: Write>(
    fetcher: &dyn GpuDataFetcher,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    let count = fetcher.gpu_count()?;
    write_output(out, &GpuCount { count }, format)?;
    Ok(())
}
