//! Command handlers
//!
//! Each command handler queries a `GpuDataFetcher` and formats the result.

pub mod count;
pub mod list;
pub mod metric;
pub mod status;

pub use count::run_count;
pub use list::run_list;
pub use metric::{run_fan, run_pm, run_temp};
pub use status::run_status;

use crate::error::{AppError, Result};
use crate::fetcher::GpuDataFetcher;

/// Slots a per-GPU command should visit
///
/// An explicit slot is passed through unchecked so the backend reports an
/// invalid one itself.
pub(crate) fn target_slots(fetcher: &dyn GpuDataFetcher, gpu: Option<u32>) -> Result<Vec<u32>> {
    if let Some(slot) = gpu {
        return Ok(vec![slot]);
    }

    let count = fetcher.gpu_count()?;
    if count == 0 {
        return Err(AppError::NoGpusFound);
    }
    Ok((0..count).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockFetcher;

    #[test]
    fn test_target_slots_all() {
        let fetcher = MockFetcher::new(3);
        assert_eq!(target_slots(&fetcher, None).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_target_slots_explicit_is_unchecked() {
        let fetcher = MockFetcher::new(1);
        assert_eq!(target_slots(&fetcher, Some(5)).unwrap(), vec![5]);
    }

    #[test]
    fn test_target_slots_no_gpus() {
        let fetcher = MockFetcher::new(0);
        assert!(matches!(
            target_slots(&fetcher, None),
            Err(AppError::NoGpusFound)
        ));
    }
}
