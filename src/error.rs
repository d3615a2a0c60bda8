//! Whole-input conversions on top of the prefix parsers.
//!
//! The core parsers never fail: they report how much they consumed and how
//! the parse ended. These helpers are for callers that hold exactly one
//! number and want a `Result`.

use crate::{parse_float, parse_integer, parse_unsigned, Parsed, Status};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("cannot parse a number from empty input")]
    Empty,

    #[error("no digits at the start of the input")]
    NoDigits,

    #[error("base {0} is not 0 or in 2..=36")]
    InvalidBase(u32),

    #[error("number out of range")]
    OutOfRange,

    #[error("unexpected trailing input at byte {offset}")]
    TrailingInput { offset: usize },
}

fn exact<T>(input: &[u8], base: u32, parsed: Parsed<T>) -> Result<T, ParseError> {
    match parsed.status {
        Status::InvalidBase => Err(ParseError::InvalidBase(base)),
        Status::NoConversion if input.is_empty() => Err(ParseError::Empty),
        Status::NoConversion => Err(ParseError::NoDigits),
        Status::OutOfRange => Err(ParseError::OutOfRange),
        Status::Complete if parsed.consumed != input.len() => Err(ParseError::TrailingInput {
            offset: parsed.consumed,
        }),
        Status::Complete => Ok(parsed.value),
    }
}

/// Parse all of `input` as an `i64` in `base` (0 to auto-detect).
pub fn parse_i64_exact(input: &[u8], base: u32) -> Result<i64, ParseError> {
    exact(input, base, parse_integer(input, base))
}

/// Parse all of `input` as a `u64` in `base` (0 to auto-detect).
pub fn parse_u64_exact(input: &[u8], base: u32) -> Result<u64, ParseError> {
    exact(input, base, parse_unsigned(input, base))
}

/// Parse all of `input` as an `f64`.
pub fn parse_f64_exact(input: &[u8]) -> Result<f64, ParseError> {
    exact(input, 10, parse_float(input))
}
