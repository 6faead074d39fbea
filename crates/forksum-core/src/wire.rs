//! Line-oriented wire format between a unit and its creator.
//!
//! A unit writes its result as two newline-terminated base-10 integers,
//! sum first, then count:
//!
//! ```text
//! 55\n
//! 19\n
//! ```
//!
//! There is no framing, length prefix or checksum. Anything after the
//! second line is ignored.

use std::io::{BufRead, Write};

use crate::error::{Field, ForkSumError};
use crate::outcome::ForkSum;

/// Write a result in wire format and flush it.
///
/// # Example
/// ```
/// use forksum_core::outcome::ForkSum;
/// use forksum_core::wire;
///
/// let mut buf = Vec::new();
/// wire::encode(&ForkSum { sum: 55, count: 19 }, &mut buf).unwrap();
/// assert_eq!(buf, b"55\n19\n");
/// ```
pub fn encode(result: &ForkSum, out: &mut dyn Write) -> Result<(), ForkSumError> {
    write!(out, "{}\n{}\n", result.sum, result.count)?;
    out.flush()?;
    Ok(())
}

/// Read a result in wire format.
///
/// End of stream before both lines have arrived is [`ForkSumError::Truncated`];
/// a line that is not a bare integer is [`ForkSumError::Parse`].
pub fn decode(input: &mut dyn BufRead) -> Result<ForkSum, ForkSumError> {
    let sum = read_int_line(input, Field::Sum)?;
    let count = read_int_line(input, Field::Count)?;
    if count < 1 {
        return Err(ForkSumError::InvalidCount(count));
    }
    Ok(ForkSum { sum, count })
}

fn read_int_line(input: &mut dyn BufRead, field: Field) -> Result<i64, ForkSumError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(ForkSumError::Truncated(field));
    }
    parse_int(&line, field)
}

/// Parse one wire line: surrounding whitespace is ignored, anything else
/// that is not part of a base-10 integer is an error.
pub fn parse_int(line: &str, field: Field) -> Result<i64, ForkSumError> {
    let text = line.trim();
    text.parse::<i64>().map_err(|source| ForkSumError::Parse {
        field,
        line: text.to_string(),
        source,
    })
}
