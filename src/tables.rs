//! Lookup tables shared by the parsers.
//!
//! Every table is built by a `const fn` at compile time. Nothing here is
//! mutated after that, so the tables can be read from any thread without a
//! first-use guard.

/// Smallest base accepted by the integer parsers.
pub const MIN_BASE: u32 = 2;
/// Largest base accepted by the integer parsers.
pub const MAX_BASE: u32 = 36;

/// Digit value of every byte. `0-9`, `a-z` and `A-Z` map to 0..=35,
/// everything else is `None`.
pub static DIGIT_VALUES: [Option<u8>; 256] = build_digit_values();

const fn build_digit_values() -> [Option<u8>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < 256 {
        let byte = i as u8;
        table[i] = match byte {
            b'0'..=b'9' => Some(byte - b'0'),
            b'a'..=b'z' => Some(byte - b'a' + 10),
            b'A'..=b'Z' => Some(byte - b'A' + 10),
            _ => None,
        };
        i += 1;
    }
    table
}

/// Value of `byte` as a digit of `base`, or `None` if it is not one.
#[inline(always)]
pub fn digit_value(byte: u8, base: u32) -> Option<u64> {
    match DIGIT_VALUES[byte as usize] {
        Some(d) if (d as u32) < base => Some(d as u64),
        _ => None,
    }
}

/// Overflow thresholds for one base: an accumulator above `single` cannot
/// take one more digit, above `pair` it cannot take two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub single: u64,
    pub pair: u64,
}

/// Per-base thresholds (`limit / base`, `limit / base²`) for one
/// destination limit.
#[derive(Debug)]
pub struct DivisionTable {
    limit: u64,
    thresholds: [Thresholds; MAX_BASE as usize + 1],
}

impl DivisionTable {
    pub const fn new(limit: u64) -> Self {
        let mut thresholds = [Thresholds { single: 0, pair: 0 }; MAX_BASE as usize + 1];
        let mut base = MIN_BASE as usize;
        while base <= MAX_BASE as usize {
            let b = base as u64;
            thresholds[base] = Thresholds {
                single: limit / b,
                pair: limit / (b * b),
            };
            base += 1;
        }
        Self { limit, thresholds }
    }

    /// Largest magnitude the destination can hold.
    #[inline(always)]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Thresholds for `base`. `base` must already be in `MIN_BASE..=MAX_BASE`.
    #[inline(always)]
    pub fn get(&self, base: u32) -> Thresholds {
        self.thresholds[base as usize]
    }
}

/// Positive `i64` magnitudes.
pub static SIGNED_POSITIVE: DivisionTable = DivisionTable::new(i64::MAX as u64);
/// Negative `i64` magnitudes, one larger than the positive side.
pub static SIGNED_NEGATIVE: DivisionTable = DivisionTable::new(i64::MIN.unsigned_abs());
/// `u64` magnitudes.
pub static UNSIGNED: DivisionTable = DivisionTable::new(u64::MAX);

/// Entries in [`POWERS_OF_10`].
pub const POWER_ENTRIES: usize = 9;

/// `10^(2^k)` for k in 0..=8. Any exponent below 512 is a product of a
/// subset of these.
pub static POWERS_OF_10: [f64; POWER_ENTRIES] =
    [1e1, 1e2, 1e4, 1e8, 1e16, 1e32, 1e64, 1e128, 1e256];

/// Entries in [`FRACTION_MULTIPLIER`].
pub const FRACTION_DIGITS: usize = 32;

/// `10^-d` for d in 0..=31, indexed by the number of fractional digits.
pub static FRACTION_MULTIPLIER: [f64; FRACTION_DIGITS] = [
    1e0, 1e-1, 1e-2, 1e-3, 1e-4, 1e-5, 1e-6, 1e-7, 1e-8, 1e-9, 1e-10, 1e-11, 1e-12, 1e-13, 1e-14,
    1e-15, 1e-16, 1e-17, 1e-18, 1e-19, 1e-20, 1e-21, 1e-22, 1e-23, 1e-24, 1e-25, 1e-26, 1e-27,
    1e-28, 1e-29, 1e-30, 1e-31,
];
