//! Histogram accumulation strategies.
//!
//! All three strategies count the same dataset into one bin per integer value
//! and must produce identical bins; they differ only in how workers share the
//! counters:
//!
//! - [`Variant::Private`]: thread-local bins, merged under one lock after a
//!   team barrier
//! - [`Variant::Atomic`]: shared `AtomicU64` bins, relaxed `fetch_add`
//! - [`Variant::Mutex`]: shared bins, one lock per bin

mod atomic;
mod locked;
mod private;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::backend::ExecutionBackend;
use crate::error::{Error, Result};

pub use locked::BinLocks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Private,
    Atomic,
    Mutex,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Private, Variant::Atomic, Variant::Mutex];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Private => "private",
            Variant::Atomic => "atomic",
            Variant::Mutex => "mutex",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(Variant::Private),
            "atomic" => Ok(Variant::Atomic),
            "mutex" => Ok(Variant::Mutex),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

/// Bin counts for the closed range `[min, min + bins - 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    min: i32,
    counts: Vec<u64>,
}

impl Histogram {
    pub(crate) fn from_counts(min: i32, counts: Vec<u64>) -> Self {
        Self { min, counts }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Count for `value`, or `None` if it falls outside the histogram range.
    pub fn count_of(&self, value: i32) -> Option<u64> {
        let bin = i64::from(value) - i64::from(self.min);
        usize::try_from(bin).ok().and_then(|b| self.counts.get(b).copied())
    }

    /// Sum of all bins; equals the dataset length for a correct count.
    pub fn sum(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Bin index of `value` in a histogram starting at `min`.
///
/// Correct for every `i32` pair with `value >= min`, including spans wider
/// than `i32::MAX`.
#[inline(always)]
pub(crate) fn bin_index(value: i32, min: i32) -> usize {
    value.wrapping_sub(min) as u32 as usize
}

/// Counts `data` into `bins` bins starting at `min` using `variant`, on
/// `backend`'s team. Every value must lie in `[min, min + bins - 1]`.
pub fn count(
    variant: Variant,
    data: &[i32],
    min: i32,
    bins: usize,
    backend: &dyn ExecutionBackend,
) -> Histogram {
    match variant {
        Variant::Private => private::count(data, min, bins, backend),
        Variant::Atomic => atomic::count(data, min, bins, backend),
        Variant::Mutex => locked::count(data, min, bins, backend),
    }
}
