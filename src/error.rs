use std::io;

use crate::histogram::Variant;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported variant `{0}` (use: private | atomic | mutex)")]
    UnknownVariant(String),

    #[error("unknown backend `{0}` (use: seq | rayon | threads)")]
    UnknownBackend(String),

    #[error("thread count must be positive, got {0}")]
    InvalidThreadCount(usize),

    #[error("repetition count must be positive")]
    InvalidRepetitions,

    #[error("dataset of {0} values is not addressable on this platform")]
    DatasetTooLarge(u64),

    #[error("range [{min}, {max}] needs more bins than this platform can address")]
    TooManyBins { min: i32, max: i32 },

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    /// Sum of bins differs from the number of generated values. Always a
    /// synchronization defect in the counting strategy or the backend.
    #[error(
        "histogram integrity fault: backend={backend} variant={variant} threads={threads} \
         expected sum {expected}, got {actual}"
    )]
    Integrity {
        backend: &'static str,
        variant: Variant,
        threads: usize,
        expected: u64,
        actual: u64,
    },

    #[error("failed to write record: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode record: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit status for this error class.
    ///
    /// Configuration errors exit with 2, integrity faults with 3 and output
    /// failures with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::UnknownVariant(_)
            | Error::UnknownBackend(_)
            | Error::InvalidThreadCount(_)
            | Error::InvalidRepetitions
            | Error::DatasetTooLarge(_)
            | Error::TooManyBins { .. }
            | Error::Pool(_) => 2,
            Error::Integrity { .. } => 3,
            Error::Io(_) | Error::Json(_) => 1,
        }
    }

    pub fn is_config(&self) -> bool {
        self.exit_code() == 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::UnknownVariant("foo".into()).exit_code(), 2);
        assert_eq!(Error::InvalidThreadCount(0).exit_code(), 2);
        assert_eq!(Error::InvalidRepetitions.exit_code(), 2);
        let fault = Error::Integrity {
            backend: "threads",
            variant: Variant::Atomic,
            threads: 4,
            expected: 10,
            actual: 9,
        };
        assert_eq!(fault.exit_code(), 3);
        assert!(!fault.is_config());
        let io = Error::Io(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_integrity_message_names_the_run() {
        let fault = Error::Integrity {
            backend: "rayon",
            variant: Variant::Mutex,
            threads: 8,
            expected: 100,
            actual: 99,
        };
        let msg = fault.to_string();
        assert!(msg.contains("backend=rayon"));
        assert!(msg.contains("variant=mutex"));
        assert!(msg.contains("expected sum 100, got 99"));
    }
}
