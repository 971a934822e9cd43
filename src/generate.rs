//! Parallel generation of the dataset.
//!
//! The buffer is split into one slot per worker before the region starts and
//! each worker fills its own slot from its own [`SeededStream`], so the result
//! depends only on the seed, the repetition and the partition boundaries.

use std::mem;
use std::sync::{Mutex, PoisonError};

use crate::backend::ExecutionBackend;
use crate::config::RunConfig;
use crate::partition;
use crate::rng::SeededStream;

/// Generated values together with the team size that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub values: Vec<i32>,
    pub threads_used: usize,
}

/// Splits `values` into the `team` partitions, in worker order.
///
/// Each slot is locked exactly once, by the worker that owns it, so the locks
/// are never contended. Idle workers get an empty slot.
fn partition_slots(values: &mut [i32], team: usize) -> Vec<Mutex<&mut [i32]>> {
    let n = values.len();
    let mut rest = values;
    partition::ranges(n, team)
        .map(|range| {
            let (head, tail) = mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            Mutex::new(head)
        })
        .collect()
}

/// Fills a fresh buffer of `config.n` values for repetition `repetition`.
pub fn generate(config: &RunConfig, repetition: usize, backend: &dyn ExecutionBackend) -> Dataset {
    let n = config.n();
    let (minv, maxv) = (config.min(), config.max());
    let seed = config.seed();

    let mut values = vec![0i32; n];
    let slots = partition_slots(&mut values, backend.team_size());

    let threads_used = backend.run(&|worker| {
        debug_assert_eq!(worker.team_size(), slots.len());
        let Some(slot) = slots.get(worker.index()) else {
            return;
        };
        let mut chunk = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if chunk.is_empty() {
            return;
        }
        let mut rng = SeededStream::for_worker(seed, worker.index(), repetition);
        for v in chunk.iter_mut() {
            *v = rng.next(minv, maxv);
        }
    });
    drop(slots);

    Dataset {
        values,
        threads_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;
    use crate::histogram::Variant;

    fn config(n: u64, min: i32, max: i32, threads: usize) -> RunConfig {
        RunConfig::new(n, min, max, 42, 1, Variant::Private, Some(threads)).unwrap()
    }

    #[test]
    fn test_partition_slots_match_ranges() {
        for (n, team) in [(10, 4), (3, 8), (0, 4), (100, 1)] {
            let mut values: Vec<i32> = (0..n as i32).collect();
            let slots = partition_slots(&mut values, team);
            assert_eq!(slots.len(), team);
            for (slot, range) in slots.into_iter().zip(partition::ranges(n, team)) {
                let slot = slot.into_inner().unwrap();
                let expected: Vec<i32> = range.map(|i| i as i32).collect();
                assert_eq!(&slot[..], expected.as_slice(), "n={n} team={team}");
            }
        }
    }

    #[test]
    fn test_values_in_range() {
        let cfg = config(10_000, -5, 5, 4);
        let backend = BackendKind::Threads.build(cfg.threads(), false).unwrap();
        let data = generate(&cfg, 0, backend.as_ref());
        assert_eq!(data.values.len(), 10_000);
        assert_eq!(data.threads_used, 4);
        assert!(data.values.iter().all(|v| (-5..=5).contains(v)));
    }

    #[test]
    fn test_partitions_follow_worker_streams() {
        let cfg = config(10, 0, 1000, 4);
        let backend = BackendKind::Threads.build(cfg.threads(), false).unwrap();
        let data = generate(&cfg, 3, backend.as_ref());
        for (index, range) in partition::ranges(10, 4).enumerate() {
            let mut rng = SeededStream::for_worker(42, index, 3);
            let expected: Vec<_> = range.clone().map(|_| rng.next(0, 1000)).collect();
            assert_eq!(&data.values[range], expected.as_slice());
        }
    }

    #[test]
    fn test_backends_generate_identical_data() {
        let cfg = config(50_000, 0, 255, 4);
        let team = BackendKind::Rayon.build(cfg.threads(), false).unwrap();
        let threads = BackendKind::Threads.build(cfg.threads(), false).unwrap();
        assert_eq!(
            generate(&cfg, 1, team.as_ref()),
            generate(&cfg, 1, threads.as_ref())
        );
    }

    #[test]
    fn test_repetitions_differ() {
        let cfg = config(1000, 0, 1_000_000, 2);
        let backend = BackendKind::Threads.build(cfg.threads(), false).unwrap();
        let a = generate(&cfg, 0, backend.as_ref());
        let b = generate(&cfg, 1, backend.as_ref());
        assert_ne!(a.values, b.values);
    }

    #[test]
    fn test_empty_dataset_and_idle_workers() {
        let cfg = config(0, 0, 9, 4);
        let backend = BackendKind::Rayon.build(cfg.threads(), false).unwrap();
        let data = generate(&cfg, 0, backend.as_ref());
        assert!(data.values.is_empty());
        assert_eq!(data.threads_used, 4);

        let cfg = config(3, 0, 9, 8);
        let backend = BackendKind::Threads.build(cfg.threads(), false).unwrap();
        assert_eq!(generate(&cfg, 0, backend.as_ref()).values.len(), 3);
    }
}
