//! Inclusive integer ranges and the midpoint split.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An inclusive range `[start, end]` handed to one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitRange {
    /// First integer of the range.
    pub start: i64,
    /// Last integer of the range.
    pub end: i64,
}

impl UnitRange {
    /// Create a new range. `start > end` is allowed and treated as degenerate.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Whether this range is computed directly instead of being split.
    #[must_use]
    pub const fn is_base(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `start > end`.
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Number of integers covered, or 0 for an inverted range.
    ///
    /// `[i64::MIN, i64::MAX]` covers 2^64 integers, one more than `u64` holds.
    #[must_use]
    pub fn len(&self) -> u128 {
        if self.is_inverted() {
            0
        } else {
            (i128::from(self.end) - i128::from(self.start)).unsigned_abs() + 1
        }
    }

    /// Whether the range covers no integers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_inverted()
    }

    /// Split into `[start, mid]` and `[mid + 1, end]` with
    /// `mid = start + (end - start) / 2`.
    ///
    /// Must only be called on a non-base range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn split(&self) -> (Self, Self) {
        debug_assert!(!self.is_base(), "split on base range {self}");
        // Widened so that `end - start` cannot overflow.
        let half = (i128::from(self.end) - i128::from(self.start)) / 2;
        let mid = (i128::from(self.start) + half) as i64;
        (Self::new(self.start, mid), Self::new(mid + 1, self.end))
    }

    /// Closed-form sum `end*(end+1)/2 - start*(start+1)/2 + start`.
    ///
    /// For inverted ranges this deliberately differs from what the driver
    /// returns, so validation rejects them.
    #[must_use]
    pub fn expected_sum(&self) -> i128 {
        let s = i128::from(self.start);
        let e = i128::from(self.end);
        e * (e + 1) / 2 - s * (s + 1) / 2 + s
    }

    /// Node count of the recursion tree: a full binary tree with one leaf
    /// per integer, or a single node for a base range.
    #[must_use]
    pub fn expected_units(&self) -> i128 {
        if self.is_base() {
            1
        } else {
            2 * (i128::from(self.end) - i128::from(self.start) + 1) - 1
        }
    }
}

impl fmt::Display for UnitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
