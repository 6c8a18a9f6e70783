//! Factorial lookup table driving the permutation index arithmetic.

use crate::error::Error;

/// Largest supported permutation size: `20!` still fits in an `i64`,
/// `21!` does not.
pub const MAX_N: usize = 20;

/// Precomputed `0!..=n!`.
///
/// Built once per engine invocation and owned by it; never process-wide
/// state. Immutable after construction.
#[derive(Debug, Clone)]
pub struct FactorialTable {
    values: Vec<i64>,
}

impl FactorialTable {
    /// Build the table for permutations of `{0..n-1}`.
    ///
    /// Rejects `n` outside `1..=`[`MAX_N`] before computing anything.
    pub fn new(n: usize) -> Result<Self, Error> {
        if !(1..=MAX_N).contains(&n) {
            return Err(Error::SizeOutOfRange(n));
        }
        let mut values = vec![1i64; n + 1];
        for i in 1..=n {
            values[i] = i as i64 * values[i - 1];
        }
        Ok(Self { values })
    }

    /// The permutation size this table serves.
    pub fn n(&self) -> usize {
        self.values.len() - 1
    }

    /// `i!`, for `i <= n`.
    pub fn get(&self, i: usize) -> i64 {
        self.values[i]
    }

    /// `n!`, the size of the whole permutation space.
    pub fn total(&self) -> i64 {
        self.values[self.n()]
    }
}
