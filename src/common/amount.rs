//! Fixed-point currency amounts
//!
//! Payouts are carried as decimals with at most two fractional digits. The
//! thousands-grouped rendering only exists for the presentation boundary;
//! arithmetic never goes through floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Non-negative currency value (yuan, two decimal places)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(Decimal);

/// Reasons a raw amount string could not be read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("not a non-negative decimal: '{0}'")]
    Malformed(String),

    #[error("more than two decimal places: '{0}'")]
    TooPrecise(String),
}

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Whole-yuan amount
    pub fn from_yuan(yuan: u64) -> Self {
        Self(Decimal::from(yuan))
    }

    /// Amount expressed in fen (hundredths of a yuan)
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Render with thousands separators, e.g. `1,234,567.50`
    pub fn to_grouped_string(&self) -> String {
        let plain = self.to_string();
        let (whole, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        grouped.push('.');
        grouped.push_str(fraction);
        grouped
    }
}

/// Clean a stake amount as reported by the draw data source.
///
/// Thousands separators are stripped. An empty value or the dash
/// placeholder the source prints for "not applicable" reads as zero; any
/// other non-numeric value is an error.
pub fn parse_stake_amount(raw: &str) -> Result<Amount, AmountError> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() || is_placeholder(&cleaned) {
        return Ok(Amount::ZERO);
    }

    cleaned.parse()
}

fn is_placeholder(value: &str) -> bool {
    value.chars().all(|c| c == '-')
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let well_formed = !s.is_empty()
            && s.starts_with(|c: char| c.is_ascii_digit())
            && s.chars().all(|c| c.is_ascii_digit() || c == '.');
        if !well_formed {
            return Err(AmountError::Malformed(s.to_string()));
        }

        let value = Decimal::from_str(s).map_err(|_| AmountError::Malformed(s.to_string()))?;
        if value.normalize().scale() > 2 {
            return Err(AmountError::TooPrecise(s.to_string()));
        }

        Ok(Self(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0.round_dp(2);
        value.rescale(2);
        write!(f, "{}", value)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0 + rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stake_amount_strips_thousands_separators() {
        assert_eq!(parse_stake_amount("10,000,000").unwrap(), Amount::from_yuan(10_000_000));
        assert_eq!(parse_stake_amount(" 5,347.50 ").unwrap(), Amount::from_cents(534_750));
    }

    #[test]
    fn test_placeholder_and_empty_read_as_zero() {
        assert_eq!(parse_stake_amount("---").unwrap(), Amount::ZERO);
        assert_eq!(parse_stake_amount("").unwrap(), Amount::ZERO);
        assert_eq!(parse_stake_amount("  ").unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_malformed_stake_amount_is_an_error() {
        assert!(matches!(parse_stake_amount("abc"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_stake_amount("-5"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_stake_amount("1.2.3"), Err(AmountError::Malformed(_))));
        assert!(matches!(parse_stake_amount("1e5"), Err(AmountError::Malformed(_))));
    }

    #[test]
    fn test_more_than_two_decimals_rejected() {
        assert!(matches!("1.234".parse::<Amount>(), Err(AmountError::TooPrecise(_))));
        // trailing zeros do not count as precision
        assert_eq!("1.500".parse::<Amount>().unwrap(), Amount::from_cents(150));
    }

    #[test]
    fn test_display_always_has_two_decimals() {
        assert_eq!(Amount::from_yuan(5).to_string(), "5.00");
        assert_eq!(Amount::from_cents(1_050).to_string(), "10.50");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn test_grouped_rendering() {
        assert_eq!(Amount::from_cents(123_456_750).to_grouped_string(), "1,234,567.50");
        assert_eq!(Amount::from_yuan(999).to_grouped_string(), "999.00");
        assert_eq!(Amount::from_yuan(1_000).to_grouped_string(), "1,000.00");
        assert_eq!(Amount::ZERO.to_grouped_string(), "0.00");
    }

    #[test]
    fn test_largest_cent_amount() {
        assert_eq!(Amount::from_cents(u32::MAX).to_grouped_string(), "42,949,672.95");
    }

    #[test]
    fn test_sum() {
        let total: Amount = vec![Amount::from_yuan(5), Amount::from_cents(1_550), Amount::ZERO]
            .into_iter()
            .sum();
        assert_eq!(total, Amount::from_cents(2_050));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Amount::from_yuan(300)).unwrap();
        assert_eq!(json, "\"300.00\"");

        let amount: Amount = serde_json::from_str("\"15\"").unwrap();
        assert_eq!(amount, Amount::from_yuan(15));
        assert!(serde_json::from_str::<Amount>("\"fifteen\"").is_err());
    }
}
