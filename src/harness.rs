//! Timing and validation of repetitions.
//!
//! Each repetition moves through
//! `Start -> Generating -> Generated -> Counting -> Counted -> Validated -> Emitted`.
//! `Generated` and `Counted` are reached only after the backend has joined
//! every worker, so phase timings never include a straggler from the previous
//! phase. Repetitions run strictly one after another.

use std::time::{Duration, Instant};

use crate::backend::ExecutionBackend;
use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::generate::generate;
use crate::histogram::{self, Histogram};
use crate::record::TimingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    Generating,
    Generated,
    Counting,
    Counted,
    Validated,
    Emitted,
}

/// Record and histogram of one validated repetition.
#[derive(Debug, Clone)]
pub struct Repetition {
    pub record: TimingRecord,
    pub histogram: Histogram,
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn enter(phase: Phase, repetition: usize) {
    tracing::debug!(?phase, repetition, "phase");
}

/// Checks that the histogram accounts for every generated value.
pub fn validate(
    histogram: &Histogram,
    expected: u64,
    backend: &dyn ExecutionBackend,
    config: &RunConfig,
    threads: usize,
) -> Result<u64> {
    let actual = histogram.sum();
    if actual != expected {
        return Err(Error::Integrity {
            backend: backend.name(),
            variant: config.variant(),
            threads,
            expected,
            actual,
        });
    }
    Ok(actual)
}

/// Generates, counts and validates repetition `repetition` of `config`.
pub fn run_repetition(
    config: &RunConfig,
    repetition: usize,
    backend: &dyn ExecutionBackend,
) -> Result<Repetition> {
    enter(Phase::Start, repetition);

    enter(Phase::Generating, repetition);
    let t0g = Instant::now();
    let dataset = generate(config, repetition, backend);
    let gen_elapsed = t0g.elapsed();
    enter(Phase::Generated, repetition);

    enter(Phase::Counting, repetition);
    let t0h = Instant::now();
    let hist = histogram::count(
        config.variant(),
        &dataset.values,
        config.min(),
        config.bins(),
        backend,
    );
    let sum = hist.sum();
    let hist_elapsed = t0h.elapsed();
    enter(Phase::Counted, repetition);

    let n = config.n() as u64;
    validate(&hist, n, backend, config, dataset.threads_used)?;
    enter(Phase::Validated, repetition);

    let gen_ms = millis(gen_elapsed);
    let hist_ms = millis(hist_elapsed);
    let record = TimingRecord {
        backend: backend.name(),
        variant: backend.variant_label(config.variant()),
        threads_used: dataset.threads_used,
        n,
        bins: config.bins(),
        min: config.min(),
        max: config.max(),
        seed: config.seed(),
        gen_ms,
        hist_ms,
        total_ms: gen_ms.saturating_add(hist_ms),
        sum_hist: sum,
    };

    Ok(Repetition {
        record,
        histogram: hist,
    })
}

/// Runs every repetition of `config` in order, handing each record to `emit`.
///
/// Stops at the first failure; nothing is emitted for a repetition that did
/// not validate.
pub fn run<F>(config: &RunConfig, backend: &dyn ExecutionBackend, mut emit: F) -> Result<()>
where
    F: FnMut(&TimingRecord) -> Result<()>,
{
    for repetition in 0..config.repetitions() {
        let rep = run_repetition(config, repetition, backend)?;
        emit(&rep.record)?;
        enter(Phase::Emitted, repetition);
        tracing::info!(
            backend = rep.record.backend,
            variant = rep.record.variant,
            threads = rep.record.threads_used,
            repetition,
            gen_ms = rep.record.gen_ms,
            hist_ms = rep.record.hist_ms,
            "repetition complete"
        );
    }
    Ok(())
}
