//! Parallel flip-count reduction over blocks of the permutation space.
//!
//! `[0, n!)` is cut into contiguous blocks. Each block seeds its own
//! permutation by direct index decode, walks its range with the
//! successor step, and folds flip counts into a private summary; blocks
//! share nothing mutable. A small pool of scoped worker threads claims
//! block indices from an atomic cursor, and the calling thread folds the
//! worker summaries. Both fold operations (`+` for the checksum, `max`
//! for the flip count) are associative and commutative, so thread
//! assignment and block order can never change the result.

use std::sync::atomic::{AtomicI64, Ordering};
use std::thread;

use crate::error::Error;
use crate::factorial::FactorialTable;
use crate::flips::FlipCounter;
use crate::permutation::Permutation;

/// Aggregate outcome of one block and, merged, of a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockSummary {
    /// Alternating-sign sum of flip counts: added at even indices,
    /// subtracted at odd ones.
    pub checksum: i64,
    /// Largest flip count seen.
    pub max_flips: i64,
}

impl BlockSummary {
    /// Fold two summaries. Associative and commutative, with the default
    /// (all-zero) summary as identity.
    pub fn merge(self, other: BlockSummary) -> BlockSummary {
        BlockSummary {
            checksum: self.checksum + other.checksum,
            max_flips: self.max_flips.max(other.max_flips),
        }
    }
}

/// Count pancake flips over every permutation of `{0..n-1}`.
///
/// `block_count` controls only how the index space is partitioned for
/// the worker pool; every value produces bit-identical results. Counts
/// above `n!` are clamped to one so a block never holds less than one
/// permutation. Runs to completion once started; callers needing
/// bounded latency must bound `n` first.
pub fn run(n: usize, block_count: usize) -> Result<BlockSummary, Error> {
    if block_count == 0 {
        return Err(Error::InvalidBlockCount);
    }
    let table = FactorialTable::new(n)?;
    let total = table.total();

    let block_count = match i64::try_from(block_count) {
        Ok(count) if count <= total => count,
        _ => 1,
    };
    let block_length = total / block_count;

    let cursor = AtomicI64::new(0);
    let workers = (num_cpus::get().max(1) as i64).min(block_count);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut local = BlockSummary::default();
                    loop {
                        let block = cursor.fetch_add(1, Ordering::Relaxed);
                        let start = block * block_length;
                        if start >= total {
                            break;
                        }
                        // The last block is capped at n!; the enumeration
                        // stops there no matter how the boundaries fall.
                        let end = (start + block_length).min(total);
                        local = local.merge(run_block(start, end, &table));
                    }
                    local
                })
            })
            .collect();

        let mut summary = BlockSummary::default();
        for handle in handles {
            match handle.join() {
                Ok(local) => summary = summary.merge(local),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(summary)
    })
}

/// Walk one contiguous index range and fold its flip counts.
fn run_block(start: i64, end: i64, table: &FactorialTable) -> BlockSummary {
    let mut permutation = Permutation::at_index(start, table);
    let mut counter = FlipCounter::new(table.n());
    let mut summary = BlockSummary::default();

    for index in start..end {
        let flips = counter.count(permutation.items());
        if flips > 0 {
            if index % 2 == 0 {
                summary.checksum += flips;
            } else {
                summary.checksum -= flips;
            }
            summary.max_flips = summary.max_flips.max(flips);
        }
        // Never step past the block: at the cycle's last index the
        // successor is undefined.
        if index + 1 < end {
            permutation.advance();
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_associative_and_commutative() {
        let a = BlockSummary { checksum: 3, max_flips: 5 };
        let b = BlockSummary { checksum: -7, max_flips: 9 };
        let c = BlockSummary { checksum: 11, max_flips: 2 };
        assert_eq!(a.merge(b), b.merge(a));
        assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
        assert_eq!(a.merge(BlockSummary::default()), a);
    }

    #[test]
    fn classic_reference_values() {
        let seven = run(7, 24).unwrap();
        assert_eq!(seven, BlockSummary { checksum: 228, max_flips: 16 });

        let eight = run(8, 24).unwrap();
        assert_eq!(eight, BlockSummary { checksum: 1616, max_flips: 22 });
    }

    #[test]
    fn single_symbol_space_is_empty_work() {
        assert_eq!(
            run(1, 24).unwrap(),
            BlockSummary { checksum: 0, max_flips: 0 }
        );
    }

    #[test]
    fn partitioning_never_changes_the_result() {
        let reference = run(6, 1).unwrap();
        // 7 does not divide 720, so that case also exercises the capped
        // final block.
        for blocks in [2, 7, 24, 720] {
            assert_eq!(run(6, blocks).unwrap(), reference, "blocks={blocks}");
        }
    }

    #[test]
    fn block_counts_above_the_space_clamp_to_one() {
        assert_eq!(run(3, 1_000_000).unwrap(), run(3, 1).unwrap());
    }

    #[test]
    fn rejects_invalid_sizes_before_doing_any_work() {
        assert_eq!(run(0, 24).unwrap_err(), Error::SizeOutOfRange(0));
        assert_eq!(run(21, 24).unwrap_err(), Error::SizeOutOfRange(21));
    }

    #[test]
    fn rejects_a_zero_block_count() {
        assert_eq!(run(7, 0).unwrap_err(), Error::InvalidBlockCount);
    }

    #[test]
    fn one_block_per_permutation_still_agrees() {
        let factorial_of_6 = 720;
        assert_eq!(run(6, factorial_of_6).unwrap(), run(6, 1).unwrap());
    }
}
