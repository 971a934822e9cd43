use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;

use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{affinity, ExecutionBackend, Task, Worker};
use crate::error::Result;

/// Implicit worker team backed by a dedicated rayon pool.
///
/// Every region is a `broadcast`: each pool thread runs the task exactly once
/// and `broadcast` returns only after all of them are done, which acts as the
/// region's closing barrier.
pub struct TeamBackend {
    pool: ThreadPool,
}

impl TeamBackend {
    /// `None` keeps rayon's default team size (one thread per logical CPU).
    pub fn new(threads: Option<usize>, pin: bool) -> Result<Self> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("team-{i}"));
        if let Some(threads) = threads {
            builder = builder.num_threads(threads);
        }
        if pin {
            builder = builder.start_handler(affinity::pin_worker);
        }
        let pool = builder.build()?;
        tracing::debug!(threads = pool.current_num_threads(), pin, "team pool ready");
        Ok(Self { pool })
    }
}

impl ExecutionBackend for TeamBackend {
    fn name(&self) -> &'static str {
        "rayon"
    }

    fn team_size(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn run(&self, task: &Task<'_>) -> usize {
        let barrier = Barrier::new(self.team_size());
        let published = AtomicUsize::new(0);

        self.pool.broadcast(|ctx| {
            // Only the team itself knows its live size; worker 0 reports it.
            if ctx.index() == 0 {
                published.store(ctx.num_threads(), Ordering::Relaxed);
            }
            task(&Worker::new(ctx.index(), ctx.num_threads(), &barrier));
        });

        published.into_inner()
    }
}
