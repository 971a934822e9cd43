//! Histogram contention benchmark.
//!
//! Generates a seeded integer dataset in parallel and counts it into a
//! one-bin-per-value histogram with one of three synchronization strategies:
//!
//! - `private`: per-worker local bins merged under a single lock
//! - `atomic`: one shared array of relaxed atomic counters
//! - `mutex`: one shared array with a lock per bin
//!
//! Each strategy runs on an implicit worker team (a rayon pool), on explicit
//! scoped threads, or on the calling thread as a sequential baseline. The
//! backend only changes timing; histograms are identical for the same team
//! size.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod harness;
pub mod histogram;
pub mod partition;
pub mod record;
pub mod rng;

pub use backend::{BackendKind, ExecutionBackend, Worker};
pub use config::RunConfig;
pub use error::{Error, Result};
pub use histogram::{Histogram, Variant};
pub use record::TimingRecord;
