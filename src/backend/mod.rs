//! Execution backends: "run a team of workers, each with its own partition
//! index, then wait for all of them".
//!
//! - [`TeamBackend`]: implicit team on a rayon pool. The team size is only
//!   published from inside the parallel region.
//! - [`ThreadsBackend`]: the caller spawns and joins exactly `T` scoped threads.
//! - [`SeqBackend`]: one worker on the calling thread.

mod affinity;
mod seq;
mod team;
mod threads;

use std::fmt;
use std::str::FromStr;
use std::sync::Barrier;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::histogram::Variant;

pub use affinity::pin_worker;
pub use seq::SeqBackend;
pub use team::TeamBackend;
pub use threads::ThreadsBackend;

/// Handle given to each worker of a parallel region.
pub struct Worker<'a> {
    index: usize,
    team_size: usize,
    barrier: &'a Barrier,
}

impl<'a> Worker<'a> {
    pub(crate) fn new(index: usize, team_size: usize, barrier: &'a Barrier) -> Self {
        Self {
            index,
            team_size,
            barrier,
        }
    }

    /// Zero-based position of this worker in its team.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn team_size(&self) -> usize {
        self.team_size
    }

    /// Blocks until every worker in the team reaches this point.
    pub fn barrier(&self) {
        self.barrier.wait();
    }
}

/// Task run by every worker of a region.
pub type Task<'t> = dyn Fn(&Worker<'_>) + Sync + 't;

/// Parallel-for-partitions capability.
pub trait ExecutionBackend: Send + Sync {
    /// Short name used in output records.
    fn name(&self) -> &'static str;

    /// Label written in the variant column of this backend's records.
    fn variant_label(&self, variant: Variant) -> &'static str {
        variant.as_str()
    }

    /// Number of workers every region of this backend runs with.
    fn team_size(&self) -> usize;

    /// Runs `task` once on every worker of the team and returns after all of
    /// them have finished. Returns the number of workers that actually ran.
    fn run(&self, task: &Task<'_>) -> usize;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Seq,
    Rayon,
    Threads,
}

impl BackendKind {
    pub const PARALLEL: [BackendKind; 2] = [BackendKind::Rayon, BackendKind::Threads];

    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Seq => "seq",
            BackendKind::Rayon => "rayon",
            BackendKind::Threads => "threads",
        }
    }

    /// Builds the backend with the requested team size, or the backend's own
    /// default when `threads` is `None`.
    pub fn build(self, threads: Option<usize>, affinity: bool) -> Result<Box<dyn ExecutionBackend>> {
        if threads == Some(0) {
            return Err(Error::InvalidThreadCount(0));
        }
        Ok(match self {
            BackendKind::Seq => Box::new(SeqBackend),
            BackendKind::Rayon => Box::new(TeamBackend::new(threads, affinity)?),
            BackendKind::Threads => Box::new(ThreadsBackend::new(threads, affinity)),
        })
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seq" => Ok(BackendKind::Seq),
            "rayon" => Ok(BackendKind::Rayon),
            "threads" => Ok(BackendKind::Threads),
            _ => Err(Error::UnknownBackend(s.to_string())),
        }
    }
}
