//! Recursion driver: base case, midpoint split, and join.
//!
//! A range with `start >= end` is a leaf. Any other range is split at
//! `mid = start + (end - start) / 2`; one unit is spawned for each half,
//! both results are read (first half first), both units are reaped, and
//! the parent's result is `sum1 + sum2` with `count1 + count2 + 1`.
//!
//! An inverted range (`start > end`) is not rejected: it logs a warning
//! and yields `{ sum: start, count: 1 }`. Validation of the final sum
//! against the closed form catches it at the root.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::ForkSumError;
use crate::options::Options;
use crate::outcome::ForkSum;
use crate::range::UnitRange;
use crate::spawner::Spawner;

/// Drives the recursive split, spawning a unit for every half-range.
///
/// # Example
/// ```
/// use std::sync::Arc;
///
/// use forksum_core::driver::Driver;
/// use forksum_core::range::UnitRange;
/// use forksum_core::spawner::ThreadSpawner;
///
/// let driver = Driver::new(Arc::new(ThreadSpawner::new()));
/// let result = driver.compute(UnitRange::new(0, 3)).unwrap();
/// assert_eq!((result.sum, result.count), (6, 7));
/// ```
#[derive(Clone)]
pub struct Driver {
    spawner: Arc<dyn Spawner>,
    cutoff: u64,
}

impl Driver {
    /// Create a driver that spawns on every split.
    #[must_use]
    pub fn new(spawner: Arc<dyn Spawner>) -> Self {
        Self { spawner, cutoff: 0 }
    }

    /// Create a driver configured from `opts`.
    #[must_use]
    pub fn with_options(spawner: Arc<dyn Spawner>, opts: &Options) -> Self {
        Self {
            spawner,
            cutoff: opts.cutoff,
        }
    }

    /// Compute the sum and unit count of `range`.
    pub fn compute(&self, range: UnitRange) -> Result<ForkSum, ForkSumError> {
        if range.is_base() {
            return Ok(base_case(range));
        }
        if range.len() <= u128::from(self.cutoff) {
            return compute_inline(range);
        }

        let (left, right) = range.split();
        let first = self.spawner.spawn(self, left)?;
        let second = self.spawner.spawn(self, right)?;

        let first = first.read()?;
        let second = second.read()?;

        let first = first.reap()?;
        let second = second.reap()?;
        ForkSum::merge(range, first, second)
    }
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("spawner", &self.spawner.name())
            .field("cutoff", &self.cutoff)
            .finish()
    }
}

fn base_case(range: UnitRange) -> ForkSum {
    if range.is_inverted() {
        warn!(start = range.start, end = range.end, "start bigger than end");
    }
    ForkSum::leaf(range)
}

/// Same recursion as [`Driver::compute`], evaluated on the calling thread.
///
/// Every node of the tree is still counted, so the result is identical.
pub fn compute_inline(range: UnitRange) -> Result<ForkSum, ForkSumError> {
    if range.is_base() {
        return Ok(base_case(range));
    }
    let (left, right) = range.split();
    let first = compute_inline(left)?;
    let second = compute_inline(right)?;
    ForkSum::merge(range, first, second)
}
