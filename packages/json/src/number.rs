//! JSON numbers: a double-precision value plus an integer view.

use std::fmt;

/// Largest integer magnitude a double holds without losing precision (2^53 - 1).
///
/// Integral numbers inside `-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER` print as bare
/// decimal digits; everything else goes through the float formatter.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Decimal exponents in this range print positionally, outside it in
/// exponent form (`1e21`, `1e-7`).
const POSITIONAL_EXPONENTS: std::ops::Range<i32> = -6..21;

/// A JSON number.
///
/// Keeps the originating double alongside a truncated integer view. The
/// integer view is only trusted (`as_i64`) when it reproduces the double
/// exactly and lies within the safe integer range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    value: f64,
    int: i64,
    exact: bool,
}

impl Number {
    pub fn from_f64(value: f64) -> Self {
        // `as` saturates and maps NaN to 0
        let int = value as i64;
        let exact = value.is_finite()
            && value.fract() == 0.0
            && int.unsigned_abs() <= MAX_SAFE_INTEGER as u64;
        Self { value, int, exact }
    }

    pub fn from_i64(value: i64) -> Self {
        Self::from_f64(value as f64)
    }

    /// Parse the text of a number token.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        raw.parse::<f64>().ok().map(Self::from_f64)
    }

    pub fn as_f64(&self) -> f64 {
        self.value
    }

    /// The integer view, when it represents the value exactly.
    pub fn as_i64(&self) -> Option<i64> {
        self.exact.then_some(self.int)
    }

    /// The value truncated toward zero, saturating at the `i64` bounds.
    pub fn truncated(&self) -> i64 {
        self.int
    }

    pub fn is_integer(&self) -> bool {
        self.exact
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Self::from_f64(f64::from(value))
    }
}

/// Writes the JSON text of the number.
///
/// Non-finite values have no JSON spelling and print as `null`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value == 0.0 {
            return f.write_str("0");
        }
        if let Some(int) = self.as_i64() {
            return write!(f, "{}", int);
        }
        if !self.value.is_finite() {
            return f.write_str("null");
        }

        // Shortest round-tripping digits, positional unless the magnitude is extreme
        let scientific = format!("{:e}", self.value);
        let exponent = scientific
            .rsplit_once('e')
            .and_then(|(_, exp)| exp.parse::<i32>().ok())
            .unwrap_or(0);
        if POSITIONAL_EXPONENTS.contains(&exponent) {
            write!(f, "{}", self.value)
        } else {
            f.write_str(&scientific)
        }
    }
}
