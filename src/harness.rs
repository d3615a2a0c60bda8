//! Benchmark harness for the numeric parsers
//!
//! Generates a reproducible mix of integer and float strings, checks every
//! parser against fixed cases and the generated data, then times each
//! parser over the same inputs.

use crate::baselines::{NaiveParser, StdParser};
use crate::{FloatParse, IntParse, SimpleParser, Status};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::hint::black_box;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, info_span};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("iterations must be at least 1")]
    NoIterations,

    #[error("sample count must be at least 1")]
    NoSamples,

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Benchmark parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Timed passes over the dataset.
    pub iterations: u32,
    /// Untimed passes before timing starts.
    pub warmup: u32,
    /// Generated strings per workload.
    pub samples: usize,
    pub seed: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            warmup: 10,
            samples: 10_000,
            seed: 12345,
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.iterations == 0 {
            return Err(HarnessError::NoIterations);
        }
        if self.samples == 0 {
            return Err(HarnessError::NoSamples);
        }
        Ok(())
    }
}

/// A generated integer string with the base to parse it in and the value
/// it was formatted from.
#[derive(Debug, Clone)]
pub struct IntSample {
    pub text: Vec<u8>,
    pub base: u32,
    pub value: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub integers: Vec<IntSample>,
    pub floats: Vec<Vec<u8>>,
}

const RADIX_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Format `value` in `base` (2..=36) with lowercase digits and a leading
/// `-` for negatives.
pub fn format_radix(value: i64, base: u32) -> String {
    debug_assert!((2..=36).contains(&base));
    let base = base as u64;
    let mut magnitude = value.unsigned_abs();
    let mut digits = Vec::with_capacity(65);
    loop {
        digits.push(RADIX_DIGITS[(magnitude % base) as usize]);
        magnitude /= base;
        if magnitude == 0 {
            break;
        }
    }
    if value < 0 {
        digits.push(b'-');
    }
    digits.reverse();
    // Only ASCII was pushed.
    String::from_utf8(digits).unwrap_or_default()
}

/// Build the benchmark inputs. The same seed always gives the same data.
pub fn generate_dataset(config: &BenchConfig) -> Dataset {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.samples;

    let mut integers = Vec::with_capacity(n);
    for i in 0..n {
        let sample = match i % 8 {
            // Small and medium decimals (the common case)
            0 | 1 => decimal(rng.gen_range(0..1_000_000)),
            2 => decimal(rng.gen_range(1_000_000..i64::MAX / 10)),
            3 => decimal(rng.gen_range(i64::MIN..0)),
            // Auto-detected prefixes
            4 => {
                let value = rng.gen_range(0..i64::MAX);
                IntSample {
                    text: format!("0x{:X}", value).into_bytes(),
                    base: 0,
                    value,
                }
            }
            5 => {
                let value = rng.gen_range(1..1_000_000_000);
                IntSample {
                    text: format!("0{:o}", value).into_bytes(),
                    base: 0,
                    value,
                }
            }
            // Any other base
            _ => {
                let value = rng.gen_range(i64::MIN / 2..i64::MAX / 2);
                let base = rng.gen_range(2..=36);
                IntSample {
                    text: format_radix(value, base).into_bytes(),
                    base,
                    value,
                }
            }
        };
        integers.push(sample);
    }

    let mut floats = Vec::with_capacity(n);
    for i in 0..n {
        let text = match i % 4 {
            // printf("%f")
            0 => format!("{:.6}", rng.gen_range(-1.0e6..1.0e6)),
            // printf("%.19e")
            1 => {
                let exponent = rng.gen_range(-30..=30);
                let value = rng.gen_range(-1.0..1.0) * 10f64.powi(exponent);
                format!("{:.19e}", value)
            }
            2 => format!("{}", rng.gen_range(0..100_000)),
            _ => format!("{:.3}", rng.gen_range(0.0..1.0)),
        };
        floats.push(text.into_bytes());
    }

    debug!(
        integers = integers.len(),
        floats = floats.len(),
        seed = config.seed,
        "generated dataset"
    );
    Dataset { integers, floats }
}

fn decimal(value: i64) -> IntSample {
    IntSample {
        text: value.to_string().into_bytes(),
        base: 10,
        value,
    }
}

/// A fixed integer input and what every parser must make of it.
#[derive(Debug, Clone, Copy)]
pub struct IntCase {
    pub input: &'static str,
    pub base: u32,
    pub value: i64,
    pub consumed: usize,
    pub status: Status,
}

const fn int_case(
    input: &'static str,
    base: u32,
    value: i64,
    consumed: usize,
    status: Status,
) -> IntCase {
    IntCase {
        input,
        base,
        value,
        consumed,
        status,
    }
}

pub const INT_CASES: &[IntCase] = &[
    int_case("0", 10, 0, 1, Status::Complete),
    int_case("2147483647", 10, 2147483647, 10, Status::Complete),
    int_case("-2147483648", 10, -2147483648, 11, Status::Complete),
    int_case("9223372036854775807", 10, i64::MAX, 19, Status::Complete),
    int_case("-9223372036854775808", 10, i64::MIN, 20, Status::Complete),
    int_case(
        "111111111111111111111111111111111",
        10,
        i64::MAX,
        33,
        Status::OutOfRange,
    ),
    int_case(
        "-99999999999999999999",
        10,
        i64::MIN,
        21,
        Status::OutOfRange,
    ),
    int_case("0xFF", 0, 255, 4, Status::Complete),
    int_case("0x1F", 0, 31, 4, Status::Complete),
    int_case("0x1F", 16, 31, 4, Status::Complete),
    int_case("017", 0, 15, 3, Status::Complete),
    int_case("17", 8, 15, 2, Status::Complete),
    int_case("42", 0, 42, 2, Status::Complete),
    int_case("  +12abc", 10, 12, 5, Status::Complete),
    int_case("zz", 36, 1295, 2, Status::Complete),
    int_case("-1010", 2, -10, 5, Status::Complete),
    int_case("ZZZ", 10, 0, 0, Status::NoConversion),
    int_case("", 10, 0, 0, Status::NoConversion),
    int_case("-", 10, 0, 0, Status::NoConversion),
    int_case("+", 10, 0, 0, Status::NoConversion),
    int_case("12", 37, 0, 0, Status::InvalidBase),
];

/// A fixed float input. A NaN `value` expects any NaN.
#[derive(Debug, Clone, Copy)]
pub struct FloatCase {
    pub input: &'static str,
    pub value: f64,
    pub consumed: usize,
}

const fn float_case(input: &'static str, value: f64, consumed: usize) -> FloatCase {
    FloatCase {
        input,
        value,
        consumed,
    }
}

pub const FLOAT_CASES: &[FloatCase] = &[
    float_case("0", 0.0, 1),
    float_case("-2.0e-4", -0.0002, 7),
    float_case("2e00004", 20000.0, 7),
    float_case("1e00004", 10000.0, 7),
    float_case("3.25", 3.25, 4),
    float_case("  12.5xyz", 12.5, 6),
    float_case("1.5e10", 1.5e10, 6),
    float_case("Infinity", f64::INFINITY, 8),
    float_case("infinity", f64::INFINITY, 8),
    float_case("INFINITY", f64::INFINITY, 8),
    float_case("inf", f64::INFINITY, 3),
    float_case("Inf", f64::INFINITY, 3),
    float_case("-inf", f64::NEG_INFINITY, 4),
    float_case("NaN", f64::NAN, 3),
    float_case("nan", f64::NAN, 3),
    float_case("NAN", f64::NAN, 3),
    float_case("ZZZ", 0.0, 0),
    float_case("", 0.0, 0),
    float_case("-", 0.0, 0),
    float_case("+", 0.0, 0),
];

fn close_enough(actual: f64, expected: f64) -> bool {
    if expected.is_nan() {
        return actual.is_nan();
    }
    if expected.is_infinite() || expected == 0.0 {
        return actual == expected;
    }
    (actual - expected).abs() <= expected.abs() * 1e-12
}

/// Check an integer parser against [`INT_CASES`] and the generated samples.
/// Every mismatch is logged; returns how many there were.
pub fn verify_integers<P: IntParse>(name: &str, parser: &P, data: &[IntSample]) -> usize {
    let mut failures = 0;

    for case in INT_CASES {
        let r = parser.parse_i64(case.input.as_bytes(), case.base);
        if (r.value, r.consumed, r.status) != (case.value, case.consumed, case.status) {
            error!(
                parser = name,
                input = case.input,
                base = case.base,
                got = ?r,
                "test {} failed",
                case.input
            );
            failures += 1;
        }
    }

    for sample in data {
        let r = parser.parse_i64(&sample.text, sample.base);
        if r.value != sample.value
            || r.consumed != sample.text.len()
            || r.status != Status::Complete
        {
            error!(
                parser = name,
                input = %String::from_utf8_lossy(&sample.text),
                base = sample.base,
                expected = sample.value,
                got = ?r,
                "test {} failed",
                String::from_utf8_lossy(&sample.text)
            );
            failures += 1;
        }
    }

    failures
}

/// Check a float parser against [`FLOAT_CASES`] and, for the generated
/// samples, against the standard library's reading of the same text.
pub fn verify_floats<P: FloatParse>(name: &str, parser: &P, data: &[Vec<u8>]) -> usize {
    let mut failures = 0;

    for case in FLOAT_CASES {
        let r = parser.parse_f64(case.input.as_bytes());
        if !close_enough(r.value, case.value) || r.consumed != case.consumed {
            error!(parser = name, input = case.input, got = ?r, "test {} failed", case.input);
            failures += 1;
        }
    }

    for text in data {
        let expected = std::str::from_utf8(text)
            .ok()
            .and_then(|s| s.parse::<f64>().ok());
        let r = parser.parse_f64(text);
        let ok =
            expected.is_some_and(|e| close_enough(r.value, e)) && r.consumed == text.len();
        if !ok {
            let input = String::from_utf8_lossy(text);
            error!(
                parser = name,
                input = %input,
                expected = ?expected,
                got = ?r,
                "test {} failed",
                input
            );
            failures += 1;
        }
    }

    failures
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    Integer,
    Float,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub parser: String,
    pub workload: Workload,
    pub parses_per_second: f64,
    pub total_parses: u64,
    pub duration_ms: f64,
}

fn timed(
    name: &str,
    workload: Workload,
    per_pass: usize,
    config: &BenchConfig,
    mut pass: impl FnMut() -> u64,
) -> BenchmarkResult {
    let _span = info_span!("bench", parser = name, workload = ?workload).entered();

    let mut checksum = 0u64;
    for _ in 0..config.warmup {
        checksum = checksum.wrapping_add(pass());
    }

    let start = Instant::now();
    for _ in 0..config.iterations {
        checksum = checksum.wrapping_add(pass());
    }
    let duration = start.elapsed();
    black_box(checksum);

    let total_parses = config.iterations as u64 * per_pass as u64;
    let seconds = duration.as_secs_f64();
    let result = BenchmarkResult {
        parser: name.to_string(),
        workload,
        parses_per_second: if seconds > 0.0 { total_parses as f64 / seconds } else { 0.0 },
        total_parses,
        duration_ms: seconds * 1000.0,
    };
    info!(
        parses_per_second = result.parses_per_second,
        duration_ms = result.duration_ms,
        "finished"
    );
    result
}

pub fn bench_integers<P: IntParse>(
    name: &str,
    parser: &P,
    data: &[IntSample],
    config: &BenchConfig,
) -> BenchmarkResult {
    timed(name, Workload::Integer, data.len(), config, || {
        let mut sum = 0u64;
        for sample in data {
            let r = parser.parse_i64(black_box(&sample.text), sample.base);
            sum = sum.wrapping_add(r.value as u64);
        }
        sum
    })
}

pub fn bench_floats<P: FloatParse>(
    name: &str,
    parser: &P,
    data: &[Vec<u8>],
    config: &BenchConfig,
) -> BenchmarkResult {
    timed(name, Workload::Float, data.len(), config, || {
        let mut sum = 0u64;
        for text in data {
            let r = parser.parse_f64(black_box(text));
            sum = sum.wrapping_add(r.value.to_bits());
        }
        sum
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub config: BenchConfig,
    pub correctness: bool,
    pub failures: usize,
    pub results: Vec<BenchmarkResult>,
}

impl Report {
    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Plain-text table, one row per parser and workload.
    pub fn table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<10} {:<8} {:>16} {:>14} {:>12}",
            "parser", "workload", "parses/s", "parses", "ms"
        );
        for r in &self.results {
            let workload = match r.workload {
                Workload::Integer => "integer",
                Workload::Float => "float",
            };
            let _ = writeln!(
                out,
                "{:<10} {:<8} {:>16.0} {:>14} {:>12.3}",
                r.parser, workload, r.parses_per_second, r.total_parses, r.duration_ms
            );
        }
        if !self.correctness {
            let _ = writeln!(out, "{} correctness checks failed", self.failures);
        }
        out
    }
}

/// Verify every parser, then time them. Timing is skipped when any check
/// fails.
pub fn run(config: &BenchConfig) -> Result<Report, HarnessError> {
    config.validate()?;
    let data = generate_dataset(config);

    let simple = SimpleParser::new();
    let failures = verify_integers("simple", &simple, &data.integers)
        + verify_floats("simple", &simple, &data.floats)
        + verify_integers("std", &StdParser, &data.integers)
        + verify_floats("std", &StdParser, &data.floats)
        + verify_integers("naive", &NaiveParser, &data.integers)
        + verify_floats("naive", &NaiveParser, &data.floats);

    if failures > 0 {
        error!(failures, "correctness checks failed, skipping timing");
        return Ok(Report {
            config: config.clone(),
            correctness: false,
            failures,
            results: Vec::new(),
        });
    }

    let results = vec![
        bench_integers("simple", &simple, &data.integers, config),
        bench_integers("std", &StdParser, &data.integers, config),
        bench_integers("naive", &NaiveParser, &data.integers, config),
        bench_floats("simple", &simple, &data.floats, config),
        bench_floats("std", &StdParser, &data.floats, config),
        bench_floats("naive", &NaiveParser, &data.floats, config),
    ];

    Ok(Report {
        config: config.clone(),
        correctness: true,
        failures: 0,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_integer;

    fn small_config() -> BenchConfig {
        BenchConfig {
            iterations: 2,
            warmup: 1,
            samples: 200,
            seed: 7,
        }
    }

    #[test]
    fn test_format_radix() {
        assert_eq!(format_radix(255, 16), "ff");
        assert_eq!(format_radix(-5, 2), "-101");
        assert_eq!(format_radix(0, 36), "0");
        assert_eq!(format_radix(i64::MIN, 16), "-8000000000000000");
        for base in 2..=36 {
            for value in [0, 1, -1, 35, i64::MAX, i64::MIN, 1_234_567_890] {
                let text = format_radix(value, base);
                let r = parse_integer(text.as_bytes(), base);
                assert_eq!(r.value, value, "{} base {}", text, base);
            }
        }
    }

    #[test]
    fn test_dataset_is_reproducible() {
        let a = generate_dataset(&small_config());
        let b = generate_dataset(&small_config());
        assert_eq!(a.integers.len(), 200);
        assert_eq!(a.floats.len(), 200);
        assert!(a
            .integers
            .iter()
            .zip(&b.integers)
            .all(|(x, y)| x.text == y.text && x.value == y.value));
        assert_eq!(a.floats, b.floats);
    }

    #[test]
    fn test_all_parsers_pass_verification() {
        let data = generate_dataset(&small_config());
        let simple = SimpleParser::new();
        assert_eq!(verify_integers("simple", &simple, &data.integers), 0);
        assert_eq!(verify_floats("simple", &simple, &data.floats), 0);
        assert_eq!(verify_integers("std", &StdParser, &data.integers), 0);
        assert_eq!(verify_floats("std", &StdParser, &data.floats), 0);
        assert_eq!(verify_integers("naive", &NaiveParser, &data.integers), 0);
        assert_eq!(verify_floats("naive", &NaiveParser, &data.floats), 0);
    }

    #[test]
    fn test_run_reports_every_parser() {
        let report = run(&small_config()).unwrap();
        assert!(report.correctness);
        assert_eq!(report.results.len(), 6);
        assert!(report.results.iter().all(|r| r.total_parses == 400));

        let json = report.to_json().unwrap();
        assert!(json.contains("\"parses_per_second\""));
        assert!(json.contains("\"workload\":\"float\""));

        let table = report.table();
        assert!(table.lines().count() == 7);
        assert!(table.contains("naive"));
    }

    #[test]
    fn test_invalid_config() {
        let config = BenchConfig {
            iterations: 0,
            ..small_config()
        };
        assert!(matches!(run(&config), Err(HarnessError::NoIterations)));
        let config = BenchConfig {
            samples: 0,
            ..small_config()
        };
        assert!(matches!(config.validate(), Err(HarnessError::NoSamples)));
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: BenchConfig = serde_json::from_str(r#"{"iterations": 5}"#).unwrap();
        assert_eq!(config.iterations, 5);
        assert_eq!(config.seed, BenchConfig::default().seed);
    }
}
