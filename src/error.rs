use thiserror::Error;

/// Failures of a sieve run. A bound below 2 is not one of them: it simply has no primes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SieveError {
    /// The composite-flag array (or the result vector) for this bound could not be allocated.
    #[error("cannot allocate {bytes} bytes to sieve up to {bound}")]
    Allocation { bound: i64, bytes: usize },

    /// bound + 1 flags cannot be addressed on this platform.
    #[error("bound {bound} is too large to sieve on this platform")]
    BoundTooLarge { bound: i64 },

    #[error("segment length must be at least 1")]
    InvalidSegmentLength,
}
