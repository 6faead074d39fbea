//! The `(sum, count)` result produced by every unit.

use serde::{Deserialize, Serialize};

use crate::error::{Field, ForkSumError};
use crate::range::UnitRange;

/// Result of one unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkSum {
    /// Sum of every integer in the unit's range.
    pub sum: i64,
    /// Units created to compute `sum`, this one included.
    pub count: i64,
}

impl ForkSum {
    /// Result of a base-case unit.
    ///
    /// An inverted range still yields `start`; see [`crate::driver`].
    #[must_use]
    pub const fn leaf(range: UnitRange) -> Self {
        Self {
            sum: range.start,
            count: 1,
        }
    }

    /// Merge two children's results into their parent's, counting the
    /// parent itself.
    pub fn merge(range: UnitRange, first: Self, second: Self) -> Result<Self, ForkSumError> {
        let overflow = |field| ForkSumError::Overflow { field, range };
        let sum = first
            .sum
            .checked_add(second.sum)
            .ok_or_else(|| overflow(Field::Sum))?;
        let count = first
            .count
            .checked_add(second.count)
            .and_then(|c| c.checked_add(1))
            .ok_or_else(|| overflow(Field::Count))?;
        Ok(Self { sum, count })
    }
}
