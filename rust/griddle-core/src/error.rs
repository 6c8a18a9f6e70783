//! Error types for the core kernels.

use thiserror::Error;

/// Rejection kinds surfaced before any work starts.
///
/// The engine is a total function over its validated domain: once the
/// inputs pass these checks the computation cannot fail, so no failure
/// here is ever transient and retrying is never meaningful.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The permutation size is zero or large enough that its factorial
    /// overflows a signed 64-bit integer.
    #[error("permutation size {0} is outside the supported range 1..=20")]
    SizeOutOfRange(usize),
    /// A block count of zero cannot partition the permutation space.
    /// Counts above `n!` are not an error; they are clamped to one.
    #[error("block count must be at least 1")]
    InvalidBlockCount,
}
