use std::sync::Barrier;

use super::{ExecutionBackend, Task, Worker};
use crate::histogram::Variant;

/// Single worker on the calling thread; the sequential baseline.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeqBackend;

impl ExecutionBackend for SeqBackend {
    fn name(&self) -> &'static str {
        "seq"
    }

    /// A single worker never contends, so every strategy is the baseline.
    fn variant_label(&self, _variant: Variant) -> &'static str {
        "baseline"
    }

    fn team_size(&self) -> usize {
        1
    }

    fn run(&self, task: &Task<'_>) -> usize {
        let barrier = Barrier::new(1);
        task(&Worker::new(0, 1, &barrier));
        1
    }
}
