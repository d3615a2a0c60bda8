//! Property tests: values formatted as text parse back to themselves.

use num_parse::harness::format_radix;
use num_parse::{parse_float, parse_integer, parse_unsigned, Cursor, Status};
use proptest::prelude::*;

fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        actual.abs()
    } else {
        ((actual - expected) / expected).abs()
    }
}

fn mixed_case(word: &str, upper: &[bool]) -> String {
    word.chars()
        .zip(upper.iter().cycle())
        .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
        .collect()
}

proptest! {
    #[test]
    fn integer_round_trips_in_every_base(value: i64, base in 2u32..=36) {
        let text = format_radix(value, base);
        let r = parse_integer(text.as_bytes(), base);
        prop_assert_eq!(r.value, value);
        prop_assert_eq!(r.status, Status::Complete);
        prop_assert_eq!(r.consumed, text.len());
    }

    #[test]
    fn decimal_matches_auto_detection(value: i64) {
        let text = value.to_string();
        prop_assert_eq!(parse_integer(text.as_bytes(), 0), parse_integer(text.as_bytes(), 10));
        prop_assert_eq!(parse_integer(text.as_bytes(), 10).value, value);
    }

    #[test]
    fn prefixed_hex_and_octal_auto_detect(value: u64) {
        let hex = format!("{:#x}", value);
        prop_assert_eq!(parse_unsigned(hex.as_bytes(), 0).value, value);
        prop_assert_eq!(parse_unsigned(hex.as_bytes(), 16).value, value);

        let octal = format!("0{:o}", value);
        let r = parse_unsigned(octal.as_bytes(), 0);
        prop_assert_eq!(r.value, value);
        prop_assert_eq!(r.consumed, octal.len());
    }

    #[test]
    fn one_more_digit_overflows(extra in 0u8..=9) {
        let text = format!("{}{}", i64::MAX, extra);
        let r = parse_integer(text.as_bytes(), 10);
        prop_assert_eq!(r.value, i64::MAX);
        prop_assert!(r.overflow());
        prop_assert_eq!(r.consumed, text.len());
    }

    #[test]
    fn fixed_notation_round_trips(value in -1.0e15f64..1.0e15) {
        let text = format!("{}", value);
        let r = parse_float(text.as_bytes());
        prop_assert_eq!(r.consumed, text.len());
        prop_assert!(relative_error(r.value, value) < 1e-14, "{} -> {}", text, r.value);
    }

    #[test]
    fn printf_f_round_trips(value in -1.0e9f64..1.0e9) {
        let text = format!("{:.6}", value);
        let r = parse_float(text.as_bytes());
        let tolerance = 5e-7 + value.abs() * 1e-15;
        prop_assert!((r.value - value).abs() <= tolerance, "{} -> {}", text, r.value);
    }

    #[test]
    fn scientific_notation_round_trips(mantissa in 1.0f64..10.0, exponent in -300i32..=300) {
        let text = format!("{}e{}", mantissa, exponent);
        let expected: f64 = text.parse().unwrap();
        let r = parse_float(text.as_bytes());
        prop_assert_eq!(r.status, Status::Complete);
        prop_assert_eq!(r.consumed, text.len());
        prop_assert!(relative_error(r.value, expected) < 1e-13, "{} -> {}", text, r.value);
    }

    #[test]
    fn exponents_past_308_are_out_of_range(exponent in 309u32..100_000, negative: bool) {
        let text = format!("1e{}{}", if negative { "-" } else { "" }, exponent);
        let r = parse_float(text.as_bytes());
        prop_assert_eq!(r.value, 0.0);
        prop_assert!(r.overflow());
    }

    #[test]
    fn special_tokens_ignore_case(upper in proptest::collection::vec(any::<bool>(), 8)) {
        let inf = mixed_case("infinity", &upper);
        prop_assert_eq!(parse_float(inf.as_bytes()).value, f64::INFINITY);
        prop_assert_eq!(parse_float(inf[..3].as_bytes()).value, f64::INFINITY);
        let nan = mixed_case("nan", &upper);
        prop_assert!(parse_float(nan.as_bytes()).value.is_nan());
    }

    #[test]
    fn cursor_reads_back_a_list(values in proptest::collection::vec(any::<i64>(), 0..32)) {
        let text = values.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");
        let mut cursor = Cursor::new(text.as_bytes());
        let mut parsed = Vec::new();
        while let Some(r) = cursor.next_i64(10) {
            prop_assert_eq!(r.status, Status::Complete);
            parsed.push(r.value);
        }
        prop_assert_eq!(parsed, values);
    }
}
