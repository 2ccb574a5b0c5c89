//! Fixed-point plan rates.
//!
//! Rates are stored as a whole number of cents. Parsing works on the decimal
//! digits directly and rounds to two places with round-half-to-even, so two
//! inputs that differ only past the second fractional digit compare equal
//! exactly when their rounded values do. No binary floating point is involved.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// Exponents beyond this are rejected rather than expanded.
const MAX_EXPONENT: u32 = 1024;

/// Move the decimal point of `whole.frac` by `exponent` places, padding with
/// zeros as needed.
fn shift_point(whole: &str, frac: &str, exponent: i32) -> (String, String) {
    if exponent == 0 {
        return (whole.to_string(), frac.to_string());
    }
    let digits = format!("{whole}{frac}");
    let point = whole.len() as i64 + i64::from(exponent);
    if point <= 0 {
        (String::new(), format!("{}{digits}", "0".repeat(point.unsigned_abs() as usize)))
    } else if point as usize >= digits.len() {
        let pad = point as usize - digits.len();
        (format!("{digits}{}", "0".repeat(pad)), String::new())
    } else {
        let (w, f) = digits.split_at(point as usize);
        (w.to_string(), f.to_string())
    }
}

/// A plan premium with exactly two fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate {
    cents: u64,
}

impl Rate {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(self) -> u64 {
        self.cents
    }

    /// Parse a positive decimal such as `245.20`, `65.389`, `.5` or `2.4520e2`.
    ///
    /// An `e`/`E` exponent moves the decimal point before rounding. Returns
    /// `None` for empty, signed-negative, zero, non-decimal (`NaN`, thousands
    /// separators) or out-of-range input. Positivity is checked on the value
    /// as written, before rounding.
    pub fn parse(text: &str) -> Option<Self> {
        let s = text.trim();
        let s = s.strip_prefix('+').unwrap_or(s);

        let (mantissa, exponent) = match s.find(['e', 'E']) {
            Some(at) => (&s[..at], s[at + 1..].parse::<i32>().ok()?),
            None => (s, 0),
        };
        if exponent.unsigned_abs() > MAX_EXPONENT {
            return None;
        }

        let (whole_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if whole_digits.is_empty() && frac_digits.is_empty() {
            return None;
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole_digits) || !all_digits(frac_digits) {
            return None;
        }
        let (whole_digits, frac_digits) = shift_point(whole_digits, frac_digits, exponent);

        let mut whole: u64 = 0;
        for b in whole_digits.bytes() {
            whole = whole.checked_mul(10)?.checked_add(u64::from(b - b'0'))?;
        }

        let frac = frac_digits.as_bytes();
        let digit = |i: usize| frac.get(i).map(|b| u64::from(b - b'0')).unwrap_or(0);

        let positive = whole > 0 || frac.iter().any(|&b| b != b'0');
        if !positive {
            return None;
        }

        let mut cents = whole.checked_mul(100)?.checked_add(digit(0) * 10 + digit(1))?;

        let rest = frac.get(2..).unwrap_or(&[]);
        if let Some((&first, tail)) = rest.split_first() {
            let round_up = match first.cmp(&b'5') {
                Ordering::Greater => true,
                Ordering::Less => false,
                // Exactly half only when every later digit is zero.
                Ordering::Equal => tail.iter().any(|&b| b != b'0') || cents % 2 == 1,
            };
            if round_up {
                cents = cents.checked_add(1)?;
            }
        }

        Some(Self { cents })
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
