//! Permutation indexing and the successor walk.
//!
//! Permutations of `{0..n-1}` are enumerated in the fixed order induced
//! by a mixed-radix odometer: digit `i` has radix `i + 1` and drives a
//! left rotation of the prefix `[0, i]`. The odometer digits are exactly
//! the digits of the permutation's index in the factorial number system,
//! so any position in the order can also be seeded directly by decoding
//! its index. That direct seeding is what lets disjoint blocks of the
//! space run in parallel without walking each other's ranges.

use crate::factorial::FactorialTable;

/// One permutation of `{0..n-1}` together with the odometer digits that
/// locate it in the enumeration order.
///
/// Owned exclusively by the block that iterates it; [`advance`] mutates
/// it in place, the flip counter only reads [`items`].
///
/// [`advance`]: Permutation::advance
/// [`items`]: Permutation::items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    items: Vec<u8>,
    counters: Vec<usize>,
}

impl Permutation {
    /// Decode the permutation at `index` in `[0, n!)`.
    ///
    /// The index digits come out largest radix first; each digit then
    /// left-rotates the prefix it governs, starting from the identity.
    /// Index 0 decodes to the identity with all-zero counters, and the
    /// decode is the exact inverse of the encoding that [`advance`]
    /// steps through.
    ///
    /// [`advance`]: Permutation::advance
    pub fn at_index(index: i64, table: &FactorialTable) -> Self {
        let n = table.n();
        debug_assert!((0..table.total()).contains(&index));

        let mut counters = vec![0usize; n];
        let mut rest = index;
        for i in (0..n).rev() {
            counters[i] = (rest / table.get(i)) as usize;
            rest %= table.get(i);
        }

        let mut items: Vec<u8> = (0..n as u8).collect();
        for i in (0..n).rev() {
            items[..=i].rotate_left(counters[i]);
        }

        Self { items, counters }
    }

    /// The current permutation, read-only.
    pub fn items(&self) -> &[u8] {
        &self.items
    }

    /// The odometer digits; `counters[i]` is in `0..=i`.
    pub fn counters(&self) -> &[usize] {
        &self.counters
    }

    /// Step to the immediate successor in the enumeration order.
    ///
    /// Rotates ever-longer prefixes while the odometer carries, which is
    /// amortized O(1) across a walk. The step past the last index of the
    /// cycle is undefined (the carry would run off the end of the
    /// counters); callers walk at most `n! - 1` steps from index 0.
    pub fn advance(&mut self) {
        let mut i = 1;
        loop {
            self.items[..=i].rotate_left(1);
            self.counters[i] += 1;
            if self.counters[i] <= i {
                return;
            }
            self.counters[i] = 0;
            i += 1;
        }
    }
}
