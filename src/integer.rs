//! Integer parsing in bases 2 through 36.
//!
//! Digits are folded into a `u64` magnitude two at a time where possible.
//! Base 10 and base 16 have their own loops; every other base goes through
//! the digit table with `base²` as the pair multiplier. Each step is checked
//! against the per-base thresholds in [`crate::tables`] before multiplying,
//! so the accumulator never wraps.

use crate::tables::{
    digit_value, DivisionTable, Thresholds, MAX_BASE, MIN_BASE, SIGNED_NEGATIVE, SIGNED_POSITIVE,
    UNSIGNED,
};
use crate::{skip_spaces, take_sign, Parsed, Status};

/// Parse a signed 64-bit integer.
///
/// `base` is 0 for auto-detection (`0x` prefix for hexadecimal, a leading
/// `0` for octal, decimal otherwise) or anything in `2..=36`. Overflow
/// saturates to `i64::MAX` / `i64::MIN` and reports [`Status::OutOfRange`].
pub fn parse_integer(text: &[u8], base: u32) -> Parsed<i64> {
    match scan_magnitude(text, base, |negative| {
        if negative {
            &SIGNED_NEGATIVE
        } else {
            &SIGNED_POSITIVE
        }
    }) {
        Ok(m) => {
            // A negative magnitude of 2^63 wraps onto i64::MIN exactly.
            let value = if m.negative {
                (m.value as i64).wrapping_neg()
            } else {
                m.value as i64
            };
            Parsed::new(value, m.consumed, m.status())
        }
        Err(status) => Parsed::failed(status),
    }
}

/// Parse an unsigned 64-bit integer.
///
/// Same grammar as [`parse_integer`]. A leading `-` negates the magnitude
/// modulo 2^64, and overflow saturates to `u64::MAX` regardless of sign.
pub fn parse_unsigned(text: &[u8], base: u32) -> Parsed<u64> {
    match scan_magnitude(text, base, |_| &UNSIGNED) {
        Ok(m) if m.overflow => Parsed::new(u64::MAX, m.consumed, Status::OutOfRange),
        Ok(m) => {
            let value = if m.negative {
                m.value.wrapping_neg()
            } else {
                m.value
            };
            Parsed::new(value, m.consumed, Status::Complete)
        }
        Err(status) => Parsed::failed(status),
    }
}

struct Magnitude {
    value: u64,
    negative: bool,
    consumed: usize,
    overflow: bool,
}

impl Magnitude {
    fn status(&self) -> Status {
        if self.overflow {
            Status::OutOfRange
        } else {
            Status::Complete
        }
    }
}

fn scan_magnitude(
    text: &[u8],
    base: u32,
    table_for: fn(bool) -> &'static DivisionTable,
) -> Result<Magnitude, Status> {
    if base != 0 && !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(Status::InvalidBase);
    }

    let pos = skip_spaces(text, 0);
    let (negative, pos) = take_sign(text, pos);
    let (base, start, leading_zero) = detect_base(text, pos, base);

    let mut acc = Accumulator::new(table_for(negative), base);
    let end = match base {
        10 => acc.decimal(text, start),
        16 => acc.hex(text, start),
        _ => acc.generic(text, start, base),
    };

    if end == start && !leading_zero {
        return Err(Status::NoConversion);
    }

    Ok(Magnitude {
        value: acc.value(),
        negative,
        consumed: end,
        overflow: acc.overflow,
    })
}

/// Resolve the effective base and where its digits start. The flag is set
/// when an octal leading zero was consumed as part of the prefix.
fn detect_base(text: &[u8], pos: usize, base: u32) -> (u32, usize, bool) {
    let zero = text.get(pos) == Some(&b'0');
    let hex_prefix = zero
        && matches!(text.get(pos + 1), Some(b'x' | b'X'))
        && text
            .get(pos + 2)
            .is_some_and(|&b| digit_value(b, 16).is_some());

    match base {
        0 if hex_prefix => (16, pos + 2, false),
        0 if zero => (8, pos + 1, true),
        0 => (10, pos, false),
        16 if hex_prefix => (16, pos + 2, false),
        _ => (base, pos, false),
    }
}

#[inline(always)]
fn decimal_digit(text: &[u8], pos: usize) -> Option<u64> {
    let d = text.get(pos)?.wrapping_sub(b'0');
    (d < 10).then_some(d as u64)
}

#[inline(always)]
fn based_digit(text: &[u8], pos: usize, base: u32) -> Option<u64> {
    digit_value(*text.get(pos)?, base)
}

struct Accumulator {
    value: u64,
    limit: u64,
    thresholds: Thresholds,
    overflow: bool,
}

impl Accumulator {
    fn new(table: &DivisionTable, base: u32) -> Self {
        Self {
            value: 0,
            limit: table.limit(),
            thresholds: table.get(base),
            overflow: false,
        }
    }

    #[inline(always)]
    fn value(&self) -> u64 {
        if self.overflow {
            self.limit
        } else {
            self.value
        }
    }

    /// `value * scale + digits`, provided `value <= threshold` guarantees
    /// the multiply stays within `limit`.
    #[inline(always)]
    fn push(&mut self, threshold: u64, scale: u64, digits: u64) {
        if self.overflow {
            return;
        }
        if self.value > threshold {
            self.overflow = true;
            return;
        }
        match (self.value * scale).checked_add(digits) {
            Some(v) if v <= self.limit => self.value = v,
            _ => self.overflow = true,
        }
    }

    #[inline(always)]
    fn push_shifted(&mut self, threshold: u64, shift: u32, digits: u64) {
        if self.overflow {
            return;
        }
        if self.value > threshold {
            self.overflow = true;
            return;
        }
        let v = (self.value << shift) | digits;
        if v <= self.limit {
            self.value = v;
        } else {
            self.overflow = true;
        }
    }

    fn decimal(&mut self, text: &[u8], mut pos: usize) -> usize {
        while let (Some(hi), Some(lo)) = (decimal_digit(text, pos), decimal_digit(text, pos + 1)) {
            self.push(self.thresholds.pair, 100, hi * 10 + lo);
            pos += 2;
        }
        if let Some(d) = decimal_digit(text, pos) {
            self.push(self.thresholds.single, 10, d);
            pos += 1;
        }
        pos
    }

    fn hex(&mut self, text: &[u8], mut pos: usize) -> usize {
        while let (Some(hi), Some(lo)) =
            (based_digit(text, pos, 16), based_digit(text, pos + 1, 16))
        {
            self.push_shifted(self.thresholds.pair, 8, (hi << 4) | lo);
            pos += 2;
        }
        if let Some(d) = based_digit(text, pos, 16) {
            self.push_shifted(self.thresholds.single, 4, d);
            pos += 1;
        }
        pos
    }

    fn generic(&mut self, text: &[u8], mut pos: usize, base: u32) -> usize {
        let b = base as u64;
        while let (Some(hi), Some(lo)) =
            (based_digit(text, pos, base), based_digit(text, pos + 1, base))
        {
            self.push(self.thresholds.pair, b * b, hi * b + lo);
            pos += 2;
        }
        if let Some(d) = based_digit(text, pos, base) {
            self.push(self.thresholds.single, b, d);
            pos += 1;
        }
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(value: i64, consumed: usize) -> Parsed<i64> {
        Parsed::new(value, consumed, Status::Complete)
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_integer(b"2147483647", 10), ok(2147483647, 10));
        assert_eq!(parse_integer(b"0", 10), ok(0, 1));
        assert_eq!(parse_integer(b"7", 10), ok(7, 1));
        assert_eq!(parse_integer(b"-123", 10), ok(-123, 4));
        assert_eq!(parse_integer(b"+45", 10), ok(45, 3));
        assert_eq!(parse_integer(b"   12345xyz", 10), ok(12345, 8));
    }

    #[test]
    fn test_only_ascii_space_is_skipped() {
        assert_eq!(parse_integer(b"\t12", 10).status, Status::NoConversion);
        assert_eq!(parse_integer(b"\n12", 10).consumed, 0);
    }

    #[test]
    fn test_decimal_limits() {
        assert_eq!(parse_integer(b"9223372036854775807", 10), ok(i64::MAX, 19));
        assert_eq!(parse_integer(b"-9223372036854775808", 10), ok(i64::MIN, 20));

        let over = parse_integer(b"9223372036854775808", 10);
        assert_eq!(over.value, i64::MAX);
        assert!(over.overflow());

        let under = parse_integer(b"-9223372036854775809", 10);
        assert_eq!(under.value, i64::MIN);
        assert!(under.overflow());
    }

    #[test]
    fn test_overflow_consumes_all_digits() {
        let text = b"111111111111111111111111111111111";
        let r = parse_integer(text, 10);
        assert_eq!(r.value, i64::MAX);
        assert_eq!(r.status, Status::OutOfRange);
        assert_eq!(r.consumed, text.len());

        let r = parse_integer(b"99999999999999999999 tail", 10);
        assert_eq!(r.consumed, 20);
        assert!(r.overflow());
    }

    #[test]
    fn test_auto_detection() {
        assert_eq!(parse_integer(b"0x1F", 0), ok(31, 4));
        assert_eq!(parse_integer(b"0X1f", 0), parse_integer(b"0x1F", 16));
        assert_eq!(parse_integer(b"017", 0), ok(15, 3));
        assert_eq!(parse_integer(b"17", 8), ok(15, 2));
        assert_eq!(parse_integer(b"42", 0), parse_integer(b"42", 10));
        assert_eq!(parse_integer(b"0xFF", 0), ok(255, 4));
        assert_eq!(parse_integer(b"-0x10", 0), ok(-16, 5));
    }

    #[test]
    fn test_lone_prefixes() {
        // "0x" without a hex digit is just the zero.
        assert_eq!(parse_integer(b"0x", 0), ok(0, 1));
        assert_eq!(parse_integer(b"0xg", 16), ok(0, 1));
        assert_eq!(parse_integer(b"0", 0), ok(0, 1));
        // '8' is not octal, only the leading zero converts.
        assert_eq!(parse_integer(b"08", 0), ok(0, 1));
    }

    #[test]
    fn test_hex_limits() {
        assert_eq!(parse_integer(b"7fffffffffffffff", 16), ok(i64::MAX, 16));
        assert_eq!(parse_integer(b"-8000000000000000", 16), ok(i64::MIN, 17));
        assert!(parse_integer(b"8000000000000000", 16).overflow());
        assert_eq!(parse_integer(b"abc", 16), ok(0xabc, 3));
    }

    #[test]
    fn test_generic_bases() {
        assert_eq!(parse_integer(b"101", 2), ok(5, 3));
        assert_eq!(parse_integer(b"1012", 2), ok(5, 3));
        assert_eq!(parse_integer(b"zz", 36), ok(35 * 36 + 35, 2));
        assert_eq!(parse_integer(b"ZZ", 36), ok(1295, 2));
        assert_eq!(parse_integer(b"777", 8), ok(511, 3));
        assert_eq!(parse_integer(b"12", 3), ok(5, 2));
        let ones = "1".repeat(64);
        let r = parse_integer(ones.as_bytes(), 2);
        assert!(r.overflow());
        assert_eq!(r.value, i64::MAX);
        assert_eq!(parse_integer(&ones.as_bytes()[1..], 2), ok(i64::MAX, 63));
    }

    #[test]
    fn test_no_conversion() {
        for text in [&b""[..], b"-", b"+", b"ZZZ", b"   ", b"- 1", b"+-1"] {
            let r = parse_integer(text, 10);
            assert_eq!(r, Parsed::new(0, 0, Status::NoConversion), "{:?}", text);
        }
    }

    #[test]
    fn test_invalid_base() {
        for base in [1, 37, 100] {
            let r = parse_integer(b"123", base);
            assert_eq!(r, Parsed::new(0, 0, Status::InvalidBase));
            assert!(!r.is_valid());
        }
    }

    #[test]
    fn test_stops_at_nul() {
        assert_eq!(parse_integer(b"12\x0034", 10), ok(12, 2));
    }

    #[test]
    fn test_unsigned() {
        assert_eq!(
            parse_unsigned(b"18446744073709551615", 10),
            Parsed::new(u64::MAX, 20, Status::Complete)
        );
        let over = parse_unsigned(b"18446744073709551616", 10);
        assert_eq!(over.value, u64::MAX);
        assert!(over.overflow());
        assert_eq!(parse_unsigned(b"ffffffffffffffff", 16).value, u64::MAX);
        assert!(parse_unsigned(b"10000000000000000", 16).overflow());
        assert_eq!(parse_unsigned(b"-1", 10).value, u64::MAX);
        assert_eq!(parse_unsigned(b"0x10", 0).value, 16);
        assert_eq!(parse_unsigned(b"-", 10).status, Status::NoConversion);
    }
}
