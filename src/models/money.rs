//! Money type for ledger amounts
//!
//! Amounts are stored in minor currency units (cents) as `i64`. All balance
//! and settlement arithmetic happens on this integer; formatting with a
//! currency symbol lives in `display::currency`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount in minor units (hundredths of the ledger currency)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use split_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.cents(), 1050);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole major units, truncated toward zero
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// The minor portion (0-99)
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Smaller of two amounts
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Addition that returns `None` instead of overflowing
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtraction that returns `None` instead of overflowing
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Absolute value; `None` for the one amount without a positive counterpart
    pub const fn checked_abs(self) -> Option<Self> {
        match self.0.checked_abs() {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Sum amounts from untrusted input, `None` if the total does not fit
    ///
    /// The plain `Sum` impl is for totals already known to be in range.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::zero(), |acc, amount| acc.checked_add(amount))
    }

    /// Parse a user-entered amount
    ///
    /// Accepts "10.50", "10,50", "-10.50", "$10.50", "10" (major units) and
    /// ".5". Digits beyond the second decimal place are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest).replace(',', ".");

        if rest.is_empty() || rest.starts_with(['-', '+']) {
            return Err(invalid());
        }

        let cents = match rest.split_once('.') {
            Some((major_str, minor_str)) => {
                if minor_str.contains('.') {
                    return Err(invalid());
                }
                let major: i64 = if major_str.is_empty() {
                    0
                } else {
                    major_str.parse().map_err(|_| invalid())?
                };
                if !minor_str.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                let minor: i64 = match minor_str.len() {
                    0 => 0,
                    1 => minor_str.parse::<i64>().map_err(|_| invalid())? * 10,
                    _ => minor_str[..2].parse().map_err(|_| invalid())?,
                };
                major
                    .checked_mul(100)
                    .and_then(|c| c.checked_add(minor))
                    .ok_or_else(invalid)?
            }
            None => rest
                .parse::<i64>()
                .ok()
                .and_then(|major| major.checked_mul(100))
                .ok_or_else(invalid)?,
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Plain decimal rendering for input fields, e.g. "12.50"
    pub fn to_input_string(&self) -> String {
        self.to_string()
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.minor())
        } else {
            write!(f, "{}.{:02}", self.major(), self.minor())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.major(), 10);
        assert_eq!(m.minor(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "10.50");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        let one = Money::from_cents(1);

        assert_eq!(max.checked_add(one), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(one), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_abs(), None);
        assert_eq!(Money::from_cents(-250).checked_abs(), Some(Money::from_cents(250)));
        assert_eq!(one.checked_sub(max), Some(Money::from_cents(1 - i64::MAX)));
    }

    #[test]
    fn test_checked_sum() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(Money::checked_sum([half, half]), None);
        assert_eq!(
            Money::checked_sum([half, -half, Money::from_cents(7)]),
            Some(Money::from_cents(7))
        );
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((-a).cents(), -1000);
        assert_eq!(a.min(b), b);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("10,50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse(" 10 ").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse(".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("12.345").unwrap().cents(), 1234);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("1.a").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let by_ref: Money = amounts.iter().sum();
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
        assert_eq!(by_ref, total);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
