use std::sync::atomic::{AtomicU64, Ordering};

use super::{bin_index, Histogram};
use crate::backend::ExecutionBackend;
use crate::partition;

/// One shared array of atomic bins.
///
/// `Relaxed` is enough: bins are independent counters and nothing else is
/// published through them. The region's closing barrier orders the final
/// reads after every increment.
pub(super) fn count(
    data: &[i32],
    min: i32,
    bins: usize,
    backend: &dyn ExecutionBackend,
) -> Histogram {
    let n = data.len();
    let hist: Vec<AtomicU64> = (0..bins).map(|_| AtomicU64::new(0)).collect();

    backend.run(&|worker| {
        for &v in &data[partition::range(n, worker.team_size(), worker.index())] {
            hist[bin_index(v, min)].fetch_add(1, Ordering::Relaxed);
        }
    });

    let counts = hist.into_iter().map(AtomicU64::into_inner).collect();
    Histogram::from_counts(min, counts)
}
