//! Decimal floating-point parsing.
//!
//! The mantissa is accumulated as two integers (digits before and after the
//! point), then combined through [`FRACTION_MULTIPLIER`]. Exponents are
//! applied by multiplying the `10^(2^k)` entries of [`POWERS_OF_10`] picked
//! out by the exponent's bits, never through a general `pow`.

use crate::tables::{FRACTION_DIGITS, FRACTION_MULTIPLIER, POWERS_OF_10, POWER_ENTRIES};
use crate::{skip_spaces, take_sign, Parsed, Status};

/// Largest decimal exponent magnitude accepted.
pub const MAX_EXPONENT: u32 = 308;

// Exponent digits stop growing the value past this; anything this large is
// already out of range.
const EXPONENT_CAP: u32 = 100_000;

// Largest power-of-ten index the table can synthesize.
const MAX_SCALE: u32 = (1 << POWER_ENTRIES) - 1;

// An accumulator at or below these can take two more digits / one more
// digit without leaving u64.
const PAIR_LIMIT: u64 = (u64::MAX - 99) / 100;
const SINGLE_LIMIT: u64 = (u64::MAX - 9) / 10;

// Most digits a run may hold, so its count always indexes FRACTION_MULTIPLIER.
const MAX_DIGITS: u32 = FRACTION_DIGITS as u32 - 1;

/// Parse a double from its decimal or scientific representation, or one of
/// the tokens `inf`, `infinity` and `nan` in any case.
///
/// Exponents beyond ±308 give `0.0` with [`Status::OutOfRange`]. If nothing
/// converts, the result is `0.0` with `consumed == 0`.
pub fn parse_float(text: &[u8]) -> Parsed<f64> {
    let pos = skip_spaces(text, 0);
    let (negative, mut pos) = take_sign(text, pos);
    let signed = |v: f64| if negative { -v } else { v };

    if !text.get(pos).is_some_and(u8::is_ascii_digit) {
        return match special_token(&text[pos..]) {
            Some((value, len)) => Parsed::new(signed(value), pos + len, Status::Complete),
            None => Parsed::failed(Status::NoConversion),
        };
    }

    // Leading zeros carry no value and would only use up the digit budget.
    while text.get(pos) == Some(&b'0') {
        pos += 1;
    }

    let mut integer = Digits::default();
    let mut pos = integer.scan(text, pos);

    let mut fraction = Digits::default();
    if text.get(pos) == Some(&b'.') {
        pos = fraction.scan(text, pos + 1);
    }

    let mut mantissa = integer.value as f64;
    if integer.dropped == 0 {
        mantissa += fraction.value as f64 * FRACTION_MULTIPLIER[fraction.count as usize];
    }
    mantissa = signed(mantissa);

    // Integer digits that did not fit are a pending power of ten, folded
    // together with the explicit exponent before any scaling.
    let mut exponent = i64::from(integer.dropped);
    if matches!(text.get(pos), Some(b'e' | b'E')) {
        if let Some((explicit, end)) = scan_exponent(text, pos + 1) {
            pos = end;
            if explicit.unsigned_abs() > MAX_EXPONENT {
                return Parsed::new(0.0, pos, Status::OutOfRange);
            }
            exponent += i64::from(explicit);
        }
    }
    mantissa = scale(mantissa, exponent);

    let status = if mantissa.is_infinite() {
        Status::OutOfRange
    } else {
        Status::Complete
    };
    Parsed::new(mantissa, pos, status)
}

/// `10^exponent` as the product of the `POWERS_OF_10` entries selected by
/// the bits of `exponent`.
///
/// Only as many table entries as the exponent's range can touch are
/// scanned: 3 below 8, 6 below 64, all 9 otherwise. Exponents of 512 and
/// above are past what the table can build and give infinity.
#[inline]
pub fn power_of_ten(exponent: u32) -> f64 {
    let entries = match exponent {
        0..=7 => 3,
        8..=63 => 6,
        64..=MAX_SCALE => POWER_ENTRIES,
        _ => return f64::INFINITY,
    };
    let mut result = 1.0;
    for (bit, &power) in POWERS_OF_10[..entries].iter().enumerate() {
        if exponent & (1 << bit) != 0 {
            result *= power;
        }
    }
    result
}

/// `mantissa * 10^exponent` with a single multiply or divide.
fn scale(mantissa: f64, exponent: i64) -> f64 {
    let magnitude = exponent.unsigned_abs();
    if magnitude > u64::from(MAX_EXPONENT) {
        return if mantissa == 0.0 {
            mantissa
        } else if exponent > 0 {
            mantissa.signum() * f64::INFINITY
        } else {
            mantissa.signum() * 0.0
        };
    }
    // At most 308 here.
    let power = power_of_ten(magnitude as u32);
    if exponent < 0 {
        mantissa / power
    } else {
        mantissa * power
    }
}

fn special_token(rest: &[u8]) -> Option<(f64, usize)> {
    if starts_with_ignore_case(rest, b"infinity") {
        Some((f64::INFINITY, 8))
    } else if starts_with_ignore_case(rest, b"inf") {
        Some((f64::INFINITY, 3))
    } else if starts_with_ignore_case(rest, b"nan") {
        Some((f64::NAN, 3))
    } else {
        None
    }
}

fn starts_with_ignore_case(rest: &[u8], word: &[u8]) -> bool {
    rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word)
}

#[inline(always)]
fn decimal_digit(text: &[u8], pos: usize) -> Option<u64> {
    let d = text.get(pos)?.wrapping_sub(b'0');
    (d < 10).then_some(d as u64)
}

/// A run of decimal digits folded into a `u64`.
///
/// `count` is the number of digits held in `value`. Once `value` cannot take
/// another digit, or `count` reaches the last fractional multiplier, further
/// digits are only counted in `dropped`.
#[derive(Debug, Default)]
struct Digits {
    value: u64,
    count: u32,
    dropped: u32,
}

impl Digits {
    fn scan(&mut self, text: &[u8], mut pos: usize) -> usize {
        while let (Some(hi), Some(lo)) = (decimal_digit(text, pos), decimal_digit(text, pos + 1)) {
            if self.dropped == 0 && self.value <= PAIR_LIMIT && self.count + 2 <= MAX_DIGITS {
                self.value = self.value * 100 + hi * 10 + lo;
                self.count += 2;
            } else {
                self.push(hi);
                self.push(lo);
            }
            pos += 2;
        }
        if let Some(d) = decimal_digit(text, pos) {
            self.push(d);
            pos += 1;
        }
        pos
    }

    #[inline(always)]
    fn push(&mut self, digit: u64) {
        if self.dropped == 0 && self.value <= SINGLE_LIMIT && self.count < MAX_DIGITS {
            self.value = self.value * 10 + digit;
            self.count += 1;
        } else {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

/// Exponent digits after the marker, with an optional sign. `None` when no
/// digit follows, leaving the marker unconsumed.
fn scan_exponent(text: &[u8], pos: usize) -> Option<(i32, usize)> {
    let (negative, mut pos) = take_sign(text, pos);
    let mut magnitude = decimal_digit(text, pos)? as u32;
    pos += 1;
    while let Some(d) = decimal_digit(text, pos) {
        magnitude = (magnitude * 10 + d as u32).min(EXPONENT_CAP);
        pos += 1;
    }
    let exponent = magnitude as i32;
    Some((if negative { -exponent } else { exponent }, pos))
}
