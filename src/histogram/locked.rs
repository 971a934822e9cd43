use std::sync::{Mutex, PoisonError};

use super::{bin_index, Histogram};
use crate::backend::ExecutionBackend;
use crate::partition;

/// One lock per bin, alive for exactly one counting phase.
///
/// Built before any worker starts and consumed by [`BinLocks::into_counts`]
/// once the region has joined, so no lock can be torn down while a worker
/// still holds a reference to it.
pub struct BinLocks {
    bins: Vec<Mutex<u64>>,
}

impl BinLocks {
    pub fn new(bins: usize) -> Self {
        Self {
            bins: (0..bins).map(|_| Mutex::new(0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Increments one bin while holding only that bin's lock.
    #[inline]
    pub fn increment(&self, bin: usize) {
        let mut count = self.bins[bin].lock().unwrap_or_else(PoisonError::into_inner);
        *count += 1;
    }

    pub fn into_counts(self) -> Vec<u64> {
        self.bins
            .into_iter()
            .map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner))
            .collect()
    }
}

pub(super) fn count(
    data: &[i32],
    min: i32,
    bins: usize,
    backend: &dyn ExecutionBackend,
) -> Histogram {
    let n = data.len();
    let locks = BinLocks::new(bins);

    backend.run(&|worker| {
        for &v in &data[partition::range(n, worker.team_size(), worker.index())] {
            locks.increment(bin_index(v, min));
        }
    });

    Histogram::from_counts(min, locks.into_counts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_bin_locks_concurrent_increments() {
        let locks = BinLocks::new(2);
        thread::scope(|s| {
            for t in 0..4 {
                let locks = &locks;
                s.spawn(move || {
                    for _ in 0..1000 {
                        locks.increment(t % 2);
                    }
                });
            }
        });
        assert_eq!(locks.len(), 2);
        assert_eq!(locks.into_counts(), vec![2000, 2000]);
    }
}
