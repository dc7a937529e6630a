//! List command implementation
//!
//! Lists detected GPU slots with their names.

use crate::cli::args::OutputFormat;
use crate::cli::output::{write_output, GpuList, GpuListEntry};
use crate::error::Result;
use crate::fetcher::GpuDataFetcher;

use std::io::Write;

/// Execute the list command
pub fn run_list<W: Write>(
    fetcher: &dyn GpuDataFetcher,
    out: &mut W,
    format: OutputFormat,
    gpu: Option<u32>,
) -> Result<()> {
    let infos = match gpu {
        Some(slot) => vec![fetcher.gpu_info(slot)?],
        None => fetcher.all_gpus()?,
    };

    let gpu_list = GpuList {
        gpus: infos.iter().map(GpuListEntry::from).collect(),
    };

    write_output(out, &gpu_list, format)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockFetcher, MockGpu};

    #[test]
    fn test_run_list() {
        let fetcher = MockFetcher::with_gpus(vec![
            MockGpu::new("NVIDIA GeForce RTX 3080"),
            MockGpu::new("NVIDIA GeForce RTX 3090"),
        ]);
        let mut out = Vec::new();
        run_list(&fetcher, &mut out, OutputFormat::Compact, None).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0:NVIDIA GeForce RTX 3080, 1:NVIDIA GeForce RTX 3090\n"
        );
    }

    #[test]
    fn test_run_list_single_slot() {
        let mut out = Vec::new();
        run_list(&MockFetcher::new(3), &mut out, OutputFormat::Compact, Some(2)).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "2:Mock GPU 2\n");
    }

    #[test]
    fn test_run_list_rejected_slot() {
        let mut out = Vec::new();
        assert!(run_list(&MockFetcher::new(1), &mut out, OutputFormat::Table, Some(4)).is_err());
    }
}
