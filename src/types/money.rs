//! Monetary amounts in integer minor units
//!
//! Balances and expense amounts are stored as whole cents (`i64`) so that
//! repeated ledger operations never accumulate floating-point drift. Decimal
//! strings are parsed and rendered only at the presentation boundary, where
//! `rust_decimal` handles exact scaling.

use crate::types::LedgerError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// A signed monetary amount in cents
///
/// Positive balances mean the house owes the member money; negative balances
/// mean the member owes the house. All arithmetic used by the ledger goes
/// through the checked operations so that an overflowing transaction can be
/// rejected without touching any balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Zero cents
    pub const ZERO: Money = Money(0);

    /// Largest representable amount (used by overflow tests)
    pub const MAX: Money = Money(i64::MAX);

    /// Create a Money value from a raw cent count
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// The raw cent count
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Checked addition; `None` on overflow
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Checked subtraction; `None` on underflow
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// True for amounts strictly greater than zero
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// True for exactly zero
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl fmt::Display for Money {
    /// Render as a decimal dollar string with exactly two fractional digits
    ///
    /// Negative amounts carry a leading minus sign: `-0.30`, `12.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    /// Parse a decimal amount string into cents
    ///
    /// Accepts at most two fractional digits; anything finer would silently
    /// lose sub-cent precision, so it is rejected as a parse error. The
    /// value itself may be negative here — sign validation belongs to the
    /// ledger operations, not the parser.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)
            .map_err(|_| LedgerError::parse(format!("invalid amount '{}'", trimmed)))?;

        let scaled = decimal
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| LedgerError::parse(format!("amount '{}' out of range", trimmed)))?;

        if scaled.fract() != Decimal::ZERO {
            return Err(LedgerError::parse(format!(
                "amount '{}' has more than two decimal places",
                trimmed
            )));
        }

        scaled
            .to_i64()
            .map(Money)
            .ok_or_else(|| LedgerError::parse(format!("amount '{}' out of range", trimmed)))
    }
}

// Money crosses the API boundary as its decimal string form.

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::whole_dollars("90", 9000)]
    #[case::two_decimals("30.50", 3050)]
    #[case::one_decimal("0.5", 50)]
    #[case::zero("0", 0)]
    #[case::negative("-12.34", -1234)]
    #[case::whitespace("  60.00  ", 6000)]
    fn test_parse_valid_amounts(#[case] input: &str, #[case] expected_cents: i64) {
        let money: Money = input.parse().unwrap();
        assert_eq!(money.cents(), expected_cents);
    }

    #[rstest]
    #[case::not_a_number("abc")]
    #[case::empty("")]
    #[case::three_decimals("1.005")]
    #[case::currency_symbol("$5.00")]
    fn test_parse_invalid_amounts(#[case] input: &str) {
        let result: Result<Money, _> = input.parse();
        assert!(matches!(result, Err(LedgerError::ParseError { .. })));
    }

    #[rstest]
    #[case::positive(6000, "60.00")]
    #[case::negative(-3000, "-30.00")]
    #[case::sub_dollar(-30, "-0.30")]
    #[case::zero(0, "0.00")]
    #[case::odd_cents(3334, "33.34")]
    fn test_display(#[case] cents: i64, #[case] expected: &str) {
        assert_eq!(Money::from_cents(cents).to_string(), expected);
    }

    #[test]
    fn test_parse_display_round_trip() {
        let money: Money = "1234.56".parse().unwrap();
        assert_eq!(money.to_string(), "1234.56");
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        assert!(Money::MAX.checked_add(Money::from_cents(1)).is_none());
        assert_eq!(
            Money::from_cents(100).checked_add(Money::from_cents(-40)),
            Some(Money::from_cents(60))
        );
    }

    #[test]
    fn test_negation() {
        assert_eq!(-Money::from_cents(3000), Money::from_cents(-3000));
        assert_eq!(-Money::ZERO, Money::ZERO);
    }
}
