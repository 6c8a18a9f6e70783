//! Core compute kernels for the Griddle benchmark service.
//!
//! The centerpiece is the pancake-flip engine: for a permutation size `n`
//! it visits all `n!` permutations of `{0..n-1}` in a fixed enumeration
//! order, counting for each one how many prefix reversals it takes to
//! bring symbol `0` to the front. The counts fold into an
//! alternating-sign checksum plus the maximum flip count.
//!
//! # Architecture
//!
//! The engine is built from four pieces, leaves first:
//!
//! 1. [`FactorialTable`]: `0!..=n!`, built once per invocation and owned
//!    by it, so concurrent runs with different sizes never interfere.
//! 2. [`Permutation`]: a permutation paired with the mixed-radix counter
//!    vector that locates it in the enumeration order. Any index in
//!    `[0, n!)` can be decoded directly (factorial number system), and
//!    [`Permutation::advance`] steps to the successor in amortized O(1).
//! 3. [`FlipCounter`]: the flip-count computation, running on a reusable
//!    scratch buffer so the hot loop never allocates.
//! 4. [`run`]: cuts the index space into contiguous blocks, walks each
//!    block on a pool of scoped worker threads, and folds the per-block
//!    summaries with `+`/`max` on the calling thread.
//!
//! Direct index decoding is what makes the parallel split work: a block
//! seeds its own permutation at its start index and never touches any
//! other block's range, so there is no shared mutable state anywhere.
//!
//! The [`kernels`] module carries the two small sibling computations
//! (naive factorial, naive prime search) that the serving layers expose
//! next to the flip engine. They are collaborators, not part of the
//! engine.

pub mod engine;
pub mod error;
pub mod factorial;
pub mod flips;
pub mod kernels;
pub mod permutation;

pub use engine::{run, BlockSummary};
pub use error::Error;
pub use factorial::{FactorialTable, MAX_N};
pub use flips::FlipCounter;
pub use permutation::Permutation;
