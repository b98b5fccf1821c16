//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides arithmetic, lenient parsing for form input and the two
//! display conventions used by the budget screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use eventsx::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole currency units
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Clamp negative amounts to zero
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Self(0)
        } else {
            self
        }
    }

    /// Round to the nearest whole unit, halves away from zero
    ///
    /// ```
    /// use eventsx::models::Money;
    /// assert_eq!(Money::from_cents(1380).round_to_units(), Money::from_units(14));
    /// assert_eq!(Money::from_cents(650).round_to_units(), Money::from_units(7));
    /// ```
    pub const fn round_to_units(self) -> Self {
        let half = if self.0 < 0 { -50 } else { 50 };
        Self(self.0.saturating_add(half) / 100 * 100)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "+10.50", "$10.50", "10", ".5".
    /// Digits past the second decimal round half up ("0.005" is one cent).
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let s = s.strip_prefix('$').unwrap_or(s);
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        if s.is_empty() {
            return Err(invalid());
        }

        let cents = match s.split_once('.') {
            Some((whole, fraction)) => {
                if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
                    return Err(invalid());
                }

                let whole: i64 = if whole.is_empty() {
                    0
                } else {
                    parse_digits(whole).ok_or_else(invalid)?
                };

                // Pad to two digits, rounding on the third
                let fraction: i64 = match fraction.len() {
                    0 => 0,
                    1 => parse_digits(fraction).ok_or_else(invalid)? * 10,
                    _ => {
                        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
                            return Err(invalid());
                        }
                        let cents = parse_digits(&fraction[..2]).ok_or_else(invalid)?;
                        let round_up = fraction.as_bytes().get(2).is_some_and(|&d| d >= b'5');
                        cents + i64::from(round_up)
                    }
                };

                whole
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(fraction))
                    .ok_or_else(invalid)?
            }
            None => parse_digits(s)
                .and_then(|units| units.checked_mul(100))
                .ok_or_else(invalid)?,
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Parse user-entered text, coercing anything unusable to zero
    ///
    /// Blank, non-numeric and negative input all yield `Money::zero()`.
    /// Exponent notation ("1e3") is not a number here and also yields zero.
    pub fn parse_or_zero(s: &str) -> Self {
        Self::parse(s).unwrap_or_default().clamp_non_negative()
    }

    /// Format with a currency symbol and two decimals (e.g. "$30.00")
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }

    /// Format as a rounded whole amount followed by the symbol (e.g. "14$")
    pub fn format_whole_with_suffix(&self, symbol: &str) -> String {
        format!("{}{}", self.round_to_units().units(), symbol)
    }
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the representable range instead of overflowing
    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_units() {
        let m = Money::from_cents(1050);
        assert_eq!(m.units(), 10);
        assert_eq!(m.cents_part(), 50);
        assert_eq!(Money::from_units(20).cents(), 2000);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(3000).to_string(), "$30.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse(" 20 ").unwrap().cents(), 2000);
        assert_eq!(Money::parse("+5").unwrap().cents(), 500);
    }

    #[test]
    fn test_parse_rounds_third_decimal() {
        assert_eq!(Money::parse("0.009").unwrap().cents(), 1);
        assert_eq!(Money::parse("0.004").unwrap().cents(), 0);
        assert_eq!(Money::parse("10.125").unwrap().cents(), 1013);
        assert_eq!(Money::parse("1.995").unwrap().cents(), 200);
        assert_eq!(Money::parse("-0.015").unwrap().cents(), -2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1e3").is_err());
        assert!(Money::parse("+-5").is_err());
        assert!(Money::parse("0.1x5").is_err());
        assert!(Money::parse(".").is_err());
    }

    #[test]
    fn test_parse_or_zero_clamps() {
        assert_eq!(Money::parse_or_zero("20"), Money::from_units(20));
        assert_eq!(Money::parse_or_zero("-20"), Money::zero());
        assert_eq!(Money::parse_or_zero("twenty"), Money::zero());
        assert_eq!(Money::parse_or_zero(""), Money::zero());
    }

    #[test]
    fn test_round_to_units() {
        assert_eq!(Money::from_cents(520).round_to_units().cents(), 500);
        assert_eq!(Money::from_cents(550).round_to_units().cents(), 600);
        assert_eq!(Money::from_cents(1380).round_to_units().cents(), 1400);
        assert_eq!(Money::from_cents(-550).round_to_units().cents(), -600);
    }

    #[test]
    fn test_whole_suffix_format() {
        assert_eq!(Money::from_units(14).format_whole_with_suffix("$"), "14$");
        assert_eq!(Money::from_cents(580).format_whole_with_suffix("$"), "6$");
        assert_eq!(Money::zero().format_whole_with_suffix("$"), "0$");
    }

    #[test]
    fn test_sum() {
        let total: Money = [1000, 0, 250]
            .into_iter()
            .map(Money::from_cents)
            .sum();
        assert_eq!(total.cents(), 1250);
    }

    #[test]
    fn test_addition_saturates() {
        let huge = Money::from_cents(i64::MAX - 5);
        assert_eq!((huge + Money::from_units(10)).cents(), i64::MAX);

        let mut running = huge;
        running += Money::from_units(1);
        assert_eq!(running.cents(), i64::MAX);

        assert_eq!(Money::from_cents(i64::MAX).round_to_units().cents(), i64::MAX / 100 * 100);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
        assert_eq!(serde_json::from_str::<Money>(&json).unwrap(), m);
    }
}
