//! Error type shared by the driver, the spawners and the wire codec.

use std::fmt;
use std::io;
use std::num::ParseIntError;

use crate::range::UnitRange;

/// The two fields of a unit's result, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Sum of the unit's range.
    Sum,
    /// Number of units created for the range.
    Count,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => f.write_str("sum"),
            Self::Count => f.write_str("count"),
        }
    }
}

/// Error type for fork-sum computations.
///
/// Every variant is fatal to the computation: there is no partial result.
#[derive(Debug, thiserror::Error)]
pub enum ForkSumError {
    /// The unit's channel closed before the field arrived.
    #[error("unit channel closed before the {0} line was received")]
    Truncated(Field),

    /// A line on the unit's channel was not a bare base-10 integer.
    #[error("failed to parse {field} result from unit: {line:?}")]
    Parse {
        field: Field,
        line: String,
        #[source]
        source: ParseIntError,
    },

    /// The unit reported a count that no unit tree can produce.
    #[error("unit reported an invalid count: {0}")]
    InvalidCount(i64),

    /// Reading from a unit's channel failed.
    #[error("unit channel I/O error: {0}")]
    Io(#[from] io::Error),

    /// A unit could not be created and the failure was not transient.
    #[error("failed to spawn unit for {range}: {source}")]
    Spawn {
        range: UnitRange,
        #[source]
        source: io::Error,
    },

    /// A thread unit panicked.
    #[error("unit for {0} panicked")]
    UnitPanicked(UnitRange),

    /// A process unit exited unsuccessfully.
    #[error("unit for {range} exited with {status}")]
    UnitExited { range: UnitRange, status: String },

    /// Merging two results overflowed a 64-bit integer.
    #[error("{field} overflowed while merging {range}")]
    Overflow { field: Field, range: UnitRange },

    /// A final result disagrees with the closed-form value.
    #[error("wrong {field}: {actual} (should be: {expected})")]
    Mismatch {
        field: Field,
        actual: i64,
        expected: i128,
    },

    /// Repeated runs over the same range disagreed.
    #[error("run {run} produced a different result than run 0")]
    Inconsistent { run: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_display() {
        assert_eq!(Field::Sum.to_string(), "sum");
        assert_eq!(Field::Count.to_string(), "count");
    }

    #[test]
    fn error_display() {
        let err = ForkSumError::Truncated(Field::Count);
        assert_eq!(
            err.to_string(),
            "unit channel closed before the count line was received"
        );

        let err = ForkSumError::Mismatch {
            field: Field::Sum,
            actual: 54,
            expected: 55,
        };
        assert_eq!(err.to_string(), "wrong sum: 54 (should be: 55)");

        let err = ForkSumError::UnitPanicked(UnitRange::new(1, 4));
        assert_eq!(err.to_string(), "unit for [1, 4] panicked");
    }

    #[test]
    fn parse_error_names_field() {
        let source = "x1".parse::<i64>().unwrap_err();
        let err = ForkSumError::Parse {
            field: Field::Sum,
            line: "x1".into(),
            source,
        };
        assert_eq!(err.to_string(), "failed to parse sum result from unit: \"x1\"");
    }
}
