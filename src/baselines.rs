//! Baseline implementations for numeric parsing
//!
//! Both baselines share the token scanning below, so they agree with
//! [`crate::SimpleParser`] on how much input a number covers and differ only
//! in how the digits are turned into a value.

use crate::{skip_spaces, take_sign, FloatParse, IntParse, Parsed, Status};

/// Standard library conversions (`u64::from_str_radix`, `str::parse::<f64>`)
/// applied to the scanned token.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdParser;

/// Digit-at-a-time accumulation with checked arithmetic, and `powi` for
/// float exponents.
#[derive(Debug, Default, Clone, Copy)]
pub struct NaiveParser;

struct IntToken<'a> {
    negative: bool,
    digits: &'a [u8],
    base: u32,
    end: usize,
}

fn int_token(input: &[u8], base: u32) -> Result<IntToken<'_>, Status> {
    if base != 0 && !(2..=36).contains(&base) {
        return Err(Status::InvalidBase);
    }

    let pos = skip_spaces(input, 0);
    let (negative, mut pos) = take_sign(input, pos);

    let hex_prefix = input.get(pos) == Some(&b'0')
        && matches!(input.get(pos + 1), Some(b'x' | b'X'))
        && input.get(pos + 2).is_some_and(u8::is_ascii_hexdigit);
    let base = match base {
        0 | 16 if hex_prefix => {
            pos += 2;
            16
        }
        0 if input.get(pos) == Some(&b'0') => 8,
        0 => 10,
        b => b,
    };

    let start = pos;
    while input
        .get(pos)
        .is_some_and(|&b| (b as char).is_digit(base))
    {
        pos += 1;
    }
    if pos == start {
        return Err(Status::NoConversion);
    }

    Ok(IntToken {
        negative,
        digits: &input[start..pos],
        base,
        end: pos,
    })
}

/// Largest magnitude an `i64` of the given sign holds.
fn signed_limit(negative: bool) -> u64 {
    if negative {
        i64::MIN.unsigned_abs()
    } else {
        i64::MAX as u64
    }
}

fn to_signed(token: &IntToken<'_>, magnitude: Option<u64>) -> Parsed<i64> {
    let limit = signed_limit(token.negative);
    match magnitude {
        Some(m) if m <= limit => {
            let value = if token.negative {
                (m as i64).wrapping_neg()
            } else {
                m as i64
            };
            Parsed::new(value, token.end, Status::Complete)
        }
        _ => {
            let value = if token.negative { i64::MIN } else { i64::MAX };
            Parsed::new(value, token.end, Status::OutOfRange)
        }
    }
}

fn to_unsigned(token: &IntToken<'_>, magnitude: Option<u64>) -> Parsed<u64> {
    match magnitude {
        Some(m) if token.negative => Parsed::new(m.wrapping_neg(), token.end, Status::Complete),
        Some(m) => Parsed::new(m, token.end, Status::Complete),
        None => Parsed::new(u64::MAX, token.end, Status::OutOfRange),
    }
}

struct FloatToken {
    negative: bool,
    /// First byte after the sign.
    body: usize,
    end: usize,
    special: Option<f64>,
}

fn float_token(input: &[u8]) -> Option<FloatToken> {
    let pos = skip_spaces(input, 0);
    let (negative, body) = take_sign(input, pos);

    if !input.get(body).is_some_and(u8::is_ascii_digit) {
        let rest = &input[body..];
        let (value, len) = if starts_with_word(rest, b"infinity") {
            (f64::INFINITY, 8)
        } else if starts_with_word(rest, b"inf") {
            (f64::INFINITY, 3)
        } else if starts_with_word(rest, b"nan") {
            (f64::NAN, 3)
        } else {
            return None;
        };
        return Some(FloatToken {
            negative,
            body,
            end: body + len,
            special: Some(value),
        });
    }

    let digits_from = |mut p: usize| {
        while input.get(p).is_some_and(u8::is_ascii_digit) {
            p += 1;
        }
        p
    };

    let mut end = digits_from(body);
    if input.get(end) == Some(&b'.') {
        end = digits_from(end + 1);
    }
    if matches!(input.get(end), Some(b'e' | b'E')) {
        let (_, exp) = take_sign(input, end + 1);
        if input.get(exp).is_some_and(u8::is_ascii_digit) {
            end = digits_from(exp);
        }
    }

    Some(FloatToken {
        negative,
        body,
        end,
        special: None,
    })
}

fn starts_with_word(rest: &[u8], word: &[u8]) -> bool {
    rest.get(..word.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(word))
}

fn finish_float(token: &FloatToken, magnitude: f64) -> Parsed<f64> {
    let value = if token.negative { -magnitude } else { magnitude };
    let status = if token.special.is_none() && value.is_infinite() {
        Status::OutOfRange
    } else {
        Status::Complete
    };
    Parsed::new(value, token.end, status)
}

impl StdParser {
    fn magnitude(token: &IntToken<'_>) -> Option<u64> {
        // The token holds only valid digits, so the only error left is
        // overflow.
        let digits = std::str::from_utf8(token.digits).ok()?;
        u64::from_str_radix(digits, token.base).ok()
    }
}

impl IntParse for StdParser {
    #[inline]
    fn parse_i64(&self, input: &[u8], base: u32) -> Parsed<i64> {
        match int_token(input, base) {
            Ok(token) => to_signed(&token, Self::magnitude(&token)),
            Err(status) => Parsed::failed(status),
        }
    }

    #[inline]
    fn parse_u64(&self, input: &[u8], base: u32) -> Parsed<u64> {
        match int_token(input, base) {
            Ok(token) => to_unsigned(&token, Self::magnitude(&token)),
            Err(status) => Parsed::failed(status),
        }
    }
}

impl FloatParse for StdParser {
    #[inline]
    fn parse_f64(&self, input: &[u8]) -> Parsed<f64> {
        let Some(token) = float_token(input) else {
            return Parsed::failed(Status::NoConversion);
        };
        if let Some(special) = token.special {
            return finish_float(&token, special);
        }
        let magnitude = std::str::from_utf8(&input[token.body..token.end])
            .ok()
            .and_then(|s| s.parse::<f64>().ok());
        match magnitude {
            Some(m) => finish_float(&token, m),
            None => Parsed::failed(Status::NoConversion),
        }
    }
}

impl NaiveParser {
    fn magnitude(token: &IntToken<'_>) -> Option<u64> {
        let base = token.base as u64;
        let mut result: u64 = 0;
        for &byte in token.digits {
            let digit = (byte as char).to_digit(token.base)? as u64;
            result = result.checked_mul(base)?.checked_add(digit)?;
        }
        Some(result)
    }
}

impl IntParse for NaiveParser {
    #[inline]
    fn parse_i64(&self, input: &[u8], base: u32) -> Parsed<i64> {
        match int_token(input, base) {
            Ok(token) => to_signed(&token, Self::magnitude(&token)),
            Err(status) => Parsed::failed(status),
        }
    }

    #[inline]
    fn parse_u64(&self, input: &[u8], base: u32) -> Parsed<u64> {
        match int_token(input, base) {
            Ok(token) => to_unsigned(&token, Self::magnitude(&token)),
            Err(status) => Parsed::failed(status),
        }
    }
}

impl FloatParse for NaiveParser {
    #[inline]
    fn parse_f64(&self, input: &[u8]) -> Parsed<f64> {
        let Some(token) = float_token(input) else {
            return Parsed::failed(Status::NoConversion);
        };
        if let Some(special) = token.special {
            return finish_float(&token, special);
        }

        let mut bytes = input[token.body..token.end].iter().peekable();
        let mut value = 0.0f64;
        while let Some(&&b) = bytes.peek() {
            if !b.is_ascii_digit() {
                break;
            }
            value = value * 10.0 + (b - b'0') as f64;
            bytes.next();
        }

        if bytes.peek() == Some(&&b'.') {
            bytes.next();
            let mut scale = 0.1;
            while let Some(&&b) = bytes.peek() {
                if !b.is_ascii_digit() {
                    break;
                }
                value += (b - b'0') as f64 * scale;
                scale /= 10.0;
                bytes.next();
            }
        }

        // Whatever is left is a complete exponent: marker, sign, digits.
        if bytes.next().is_some() {
            let mut negative = false;
            let mut exponent: i32 = 0;
            for &b in bytes {
                match b {
                    b'-' => negative = true,
                    b'+' => {}
                    _ => exponent = exponent.saturating_mul(10).saturating_add((b - b'0') as i32),
                }
            }
            if negative {
                exponent = -exponent;
            }
            value *= 10f64.powi(exponent);
        }

        finish_float(&token, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_token_bounds() {
        let t = int_token(b"  -0x1fz", 0).ok().unwrap();
        assert!(t.negative);
        assert_eq!(t.digits, b"1f");
        assert_eq!((t.base, t.end), (16, 7));

        let t = int_token(b"0777", 0).ok().unwrap();
        assert_eq!((t.digits, t.base), (&b"0777"[..], 8));

        assert!(matches!(int_token(b"12", 40), Err(Status::InvalidBase)));
        assert!(matches!(int_token(b"+", 10), Err(Status::NoConversion)));
    }

    #[test]
    fn test_float_token_bounds() {
        let t = float_token(b" -1.5e+3x").unwrap();
        assert!(t.negative);
        assert_eq!((t.body, t.end), (2, 8));

        let t = float_token(b"2e").unwrap();
        assert_eq!(t.end, 1);

        let t = float_token(b"INFINITE").unwrap();
        assert_eq!(t.end, 3);
        assert_eq!(t.special, Some(f64::INFINITY));

        assert!(float_token(b".5").is_none());
    }

    #[test]
    fn test_baselines_disagree_on_huge_exponents() {
        // The library reports infinity and underflows to zero; the table
        // parser rejects exponents past 308 outright.
        assert_eq!(StdParser.parse_f64(b"1e400").value, f64::INFINITY);
        assert!(StdParser.parse_f64(b"1e400").overflow());
        assert_eq!(StdParser.parse_f64(b"1e-400").value, 0.0);
        assert_eq!(NaiveParser.parse_f64(b"1e400").value, f64::INFINITY);
    }

    #[test]
    fn test_naive_overflow() {
        let r = NaiveParser.parse_i64(b"99999999999999999999", 10);
        assert_eq!(r.value, i64::MAX);
        assert!(r.overflow());
        assert_eq!(r.consumed, 20);
        let r = NaiveParser.parse_u64(b"-5", 10);
        assert_eq!(r.value, 5u64.wrapping_neg());
    }
}
