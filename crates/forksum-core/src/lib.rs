//! # forksum-core
//!
//! Sums an inclusive integer range by splitting it in half recursively and
//! evaluating each half in its own unit of work (an OS thread or a child
//! process). Every unit reports `(sum, count)` back to its creator over a
//! one-way channel; the creator reads both halves, reaps both units, and
//! merges.

pub mod channel;
pub mod constants;
pub mod driver;
pub mod error;
pub mod options;
pub mod outcome;
pub mod range;
pub mod spawner;
pub mod wire;

// Re-exports
pub use constants::{exit_codes, DEFAULT_CUTOFF, UNIT_STACK_SIZE};
pub use driver::Driver;
pub use error::{Field, ForkSumError};
pub use options::Options;
pub use outcome::ForkSum;
pub use range::UnitRange;
pub use spawner::{ProcessSpawner, Spawner, ThreadSpawner, UnitHandle};

use std::sync::Arc;

/// Sum `start..=end` with one thread unit per split.
///
/// This is a convenience function for simple use cases. For a process
/// backend or an inline cutoff, build a [`Driver`] directly.
///
/// # Example
/// ```
/// let result = forksum_core::compute(1, 10).unwrap();
/// assert_eq!(result.sum, 55);
/// assert_eq!(result.count, 19);
/// ```
pub fn compute(start: i64, end: i64) -> Result<ForkSum, ForkSumError> {
    Driver::new(Arc::new(ThreadSpawner::new())).compute(UnitRange::new(start, end))
}
