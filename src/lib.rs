//! Numeric String Parsing Benchmark
//!
//! Hand-rolled `strtol`/`strtod` style parsers (digit-pair unrolling,
//! precomputed threshold and power tables) measured against library
//! baselines.

pub mod baselines;
pub mod cursor;
pub mod error;
pub mod float;
pub mod harness;
pub mod integer;
pub mod tables;

pub use cursor::Cursor;
pub use error::{parse_f64_exact, parse_i64_exact, parse_u64_exact, ParseError};
pub use float::parse_float;
pub use integer::{parse_integer, parse_unsigned};

/// How a parse ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A value was converted.
    Complete,
    /// No numeric token at the start of the input. Nothing was consumed.
    NoConversion,
    /// A token was consumed but its value does not fit. The value is
    /// saturated (integers) or `0.0` / infinite (floats).
    OutOfRange,
    /// The requested base is neither 0 nor in `2..=36`.
    InvalidBase,
}

/// Result of one parse: the value, how many input bytes it used, and how it
/// ended. `consumed` is what `strtol`'s `endptr` would point past.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub consumed: usize,
    pub status: Status,
}

impl<T> Parsed<T> {
    pub fn new(value: T, consumed: usize, status: Status) -> Self {
        Self {
            value,
            consumed,
            status,
        }
    }

    /// True if the magnitude did not fit.
    pub fn overflow(&self) -> bool {
        self.status == Status::OutOfRange
    }

    /// True if any input was converted, even if it then overflowed.
    pub fn is_valid(&self) -> bool {
        matches!(self.status, Status::Complete | Status::OutOfRange)
    }
}

impl<T: Default> Parsed<T> {
    /// Zero value, nothing consumed.
    pub fn failed(status: Status) -> Self {
        Self::new(T::default(), 0, status)
    }
}

/// Index of the first byte at or after `pos` that is not an ASCII space.
/// Tabs and newlines are not skipped.
#[inline(always)]
pub(crate) fn skip_spaces(text: &[u8], mut pos: usize) -> usize {
    while text.get(pos) == Some(&b' ') {
        pos += 1;
    }
    pos
}

/// Consume an optional `+`/`-` at `pos`. Returns whether it was `-` and the
/// position after it.
#[inline(always)]
pub(crate) fn take_sign(text: &[u8], pos: usize) -> (bool, usize) {
    match text.get(pos) {
        Some(b'-') => (true, pos + 1),
        Some(b'+') => (false, pos + 1),
        _ => (false, pos),
    }
}

/// Trait for integer parsing implementations
///
/// `base` is 0 for auto-detection or `2..=36`. Implementations report how
/// much of the input they consumed so callers can keep scanning after it.
pub trait IntParse {
    fn parse_i64(&self, input: &[u8], base: u32) -> Parsed<i64>;
    fn parse_u64(&self, input: &[u8], base: u32) -> Parsed<u64>;
}

/// Trait for floating-point parsing implementations
pub trait FloatParse {
    fn parse_f64(&self, input: &[u8]) -> Parsed<f64>;
}

/// The table-driven parsers in [`integer`] and [`float`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleParser;

impl SimpleParser {
    pub fn new() -> Self {
        Self
    }
}

impl IntParse for SimpleParser {
    #[inline]
    fn parse_i64(&self, input: &[u8], base: u32) -> Parsed<i64> {
        parse_integer(input, base)
    }

    #[inline]
    fn parse_u64(&self, input: &[u8], base: u32) -> Parsed<u64> {
        parse_unsigned(input, base)
    }
}

impl FloatParse for SimpleParser {
    #[inline]
    fn parse_f64(&self, input: &[u8]) -> Parsed<f64> {
        parse_float(input)
    }
}
