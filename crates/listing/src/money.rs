use core::str::FromStr;

use serde::{Deserialize, Serialize};

use itemforge_core::{DomainError, ValueObject};

/// A non-negative amount in the smallest currency unit (e.g. cents).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_minor(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    /// Parses decimal input such as `12`, `12.5` or `12.50`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('-') {
            return Err(DomainError::invalid_value(format!("price must not be negative: {s}")));
        }

        let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) || fraction.len() > 2 {
            return Err(DomainError::invalid_value(format!("not a price: {s:?}")));
        }

        let overflow = || DomainError::invalid_value(format!("price too large: {s}"));
        let whole: u64 = whole.parse().map_err(|_| overflow())?;
        let cents = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| overflow())? * 10,
            _ => fraction.parse::<u64>().map_err(|_| overflow())?,
        };

        whole
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .map(Money)
            .ok_or_else(overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_minor(1200));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_minor(1250));
        assert_eq!(" 0.07 ".parse::<Money>().unwrap(), Money::from_minor(7));
        assert_eq!("3.".parse::<Money>().unwrap(), Money::from_minor(300));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "-1", "abc", ".5", "1.234", "1,50", "1.5.0", "18446744073709551615"] {
            assert!(input.parse::<Money>().is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Money::from_minor(1250).to_string(), "12.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
        assert!(!Money::ZERO.is_positive());
    }
}
