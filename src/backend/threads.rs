use std::num::NonZeroUsize;
use std::sync::Barrier;
use std::thread;

use super::{affinity, ExecutionBackend, Task, Worker};

/// Team size when the platform cannot report its parallelism.
const FALLBACK_THREADS: usize = 4;

/// Explicit pool: the caller spawns exactly `threads` scoped workers per
/// region and joins every one of them before returning.
#[derive(Debug, Clone, Copy)]
pub struct ThreadsBackend {
    threads: usize,
    pin: bool,
}

impl ThreadsBackend {
    pub fn new(threads: Option<usize>, pin: bool) -> Self {
        let threads = threads.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(FALLBACK_THREADS)
        });
        Self {
            threads: threads.max(1),
            pin,
        }
    }

    pub fn threads(&self) -> usize {
        self.threads
    }
}

impl ExecutionBackend for ThreadsBackend {
    fn name(&self) -> &'static str {
        "threads"
    }

    fn team_size(&self) -> usize {
        self.threads
    }

    fn run(&self, task: &Task<'_>) -> usize {
        let team = self.threads;
        let pin = self.pin;
        let barrier = Barrier::new(team);

        thread::scope(|s| {
            let handles: Vec<_> = (0..team)
                .map(|index| {
                    let barrier = &barrier;
                    s.spawn(move || {
                        if pin {
                            affinity::pin_worker(index);
                        }
                        task(&Worker::new(index, team, barrier));
                    })
                })
                .collect();

            for handle in handles {
                if let Err(panic) = handle.join() {
                    std::panic::resume_unwind(panic);
                }
            }
        });

        team
    }
}
