//! Run configuration.
//!
//! [`RunConfig::new`] is the single place where raw inputs are normalized and
//! validated; everything downstream can rely on `min <= max`, `bins >= 1`,
//! a positive repetition count and an addressable dataset.

use crate::error::{Error, Result};
use crate::histogram::Variant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    n: usize,
    min: i32,
    max: i32,
    bins: usize,
    seed: u32,
    repetitions: usize,
    variant: Variant,
    threads: Option<usize>,
}

impl RunConfig {
    /// Builds a configuration, swapping `min` and `max` if they are inverted.
    ///
    /// `threads` is the requested team size; `None` leaves it to the backend.
    pub fn new(
        n: u64,
        min: i32,
        max: i32,
        seed: u32,
        repetitions: usize,
        variant: Variant,
        threads: Option<usize>,
    ) -> Result<Self> {
        let (min, max) = if max < min { (max, min) } else { (min, max) };

        let n = usize::try_from(n).map_err(|_| Error::DatasetTooLarge(n))?;
        let span = i64::from(max) - i64::from(min) + 1;
        let bins = usize::try_from(span).map_err(|_| Error::TooManyBins { min, max })?;

        if repetitions == 0 {
            return Err(Error::InvalidRepetitions);
        }
        if threads == Some(0) {
            return Err(Error::InvalidThreadCount(0));
        }

        Ok(Self {
            n,
            min,
            max,
            bins,
            seed,
            repetitions,
            variant,
            threads,
        })
    }

    /// Same as [`RunConfig::new`] with the variant given by name.
    pub fn parse(
        n: u64,
        min: i32,
        max: i32,
        seed: u32,
        repetitions: usize,
        variant: &str,
        threads: Option<usize>,
    ) -> Result<Self> {
        Self::new(n, min, max, seed, repetitions, variant.parse()?, threads)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Number of histogram bins, `max - min + 1`.
    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn repetitions(&self) -> usize {
        self.repetitions
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Copy of this configuration with another variant and team size.
    pub fn with_variant(&self, variant: Variant, threads: Option<usize>) -> Result<Self> {
        if threads == Some(0) {
            return Err(Error::InvalidThreadCount(0));
        }
        Ok(Self {
            variant,
            threads,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverted_range_is_swapped() {
        let a = RunConfig::new(100, 10, 0, 1, 1, Variant::Private, None).unwrap();
        let b = RunConfig::new(100, 0, 10, 1, 1, Variant::Private, None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.min(), 0);
        assert_eq!(a.max(), 10);
        assert_eq!(a.bins(), 11);
    }

    #[test]
    fn test_single_value_range() {
        let cfg = RunConfig::new(5, 7, 7, 1, 1, Variant::Atomic, None).unwrap();
        assert_eq!(cfg.bins(), 1);
    }

    #[test]
    fn test_full_i32_span() {
        if let Ok(cfg) = RunConfig::new(0, i32::MIN, i32::MAX, 1, 1, Variant::Atomic, None) {
            assert_eq!(cfg.bins() as u64, 1u64 << 32);
        }
    }

    #[test]
    fn test_zero_values_still_has_bins() {
        let cfg = RunConfig::new(0, 0, 255, 1, 1, Variant::Mutex, Some(4)).unwrap();
        assert_eq!(cfg.n(), 0);
        assert_eq!(cfg.bins(), 256);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            RunConfig::new(10, 0, 9, 1, 0, Variant::Private, None),
            Err(Error::InvalidRepetitions)
        ));
        assert!(matches!(
            RunConfig::new(10, 0, 9, 1, 1, Variant::Private, Some(0)),
            Err(Error::InvalidThreadCount(0))
        ));
        assert!(matches!(
            RunConfig::parse(10, 0, 9, 1, 1, "critical", None),
            Err(Error::UnknownVariant(name)) if name == "critical"
        ));
    }

    #[test]
    fn test_with_variant_keeps_dataset_parameters() {
        let cfg = RunConfig::parse(1000, 0, 9, 42, 2, "private", Some(4)).unwrap();
        let other = cfg.with_variant(Variant::Mutex, Some(8)).unwrap();
        assert_eq!(other.variant(), Variant::Mutex);
        assert_eq!(other.threads(), Some(8));
        assert_eq!((other.n(), other.bins(), other.seed()), (1000, 10, 42));
        assert!(cfg.with_variant(Variant::Atomic, Some(0)).is_err());
    }
}
