use std::sync::{Mutex, PoisonError};

use super::{bin_index, Histogram};
use crate::backend::ExecutionBackend;
use crate::partition;

/// Thread-local bins, then one serialized merge per worker.
///
/// Counting touches only the worker's own array. After the team barrier each
/// worker adds its whole array into the global bins while holding the merge
/// lock, so the merge is O(bins) per worker under a single critical section.
pub(super) fn count(
    data: &[i32],
    min: i32,
    bins: usize,
    backend: &dyn ExecutionBackend,
) -> Histogram {
    let n = data.len();
    let global = Mutex::new(vec![0u64; bins]);

    backend.run(&|worker| {
        let mut local = vec![0u64; bins];
        for &v in &data[partition::range(n, worker.team_size(), worker.index())] {
            local[bin_index(v, min)] += 1;
        }

        worker.barrier();

        let mut global = global.lock().unwrap_or_else(PoisonError::into_inner);
        for (acc, c) in global.iter_mut().zip(&local) {
            *acc += c;
        }
    });

    let counts = global.into_inner().unwrap_or_else(PoisonError::into_inner);
    Histogram::from_counts(min, counts)
}
