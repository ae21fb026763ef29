use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Money conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The amount does not land on a whole number of cents
    #[error("amount {0} does not convert to a whole number of cents")]
    FractionalCents(Decimal),

    /// The amount in cents does not fit in an i64
    #[error("amount {0} is out of range for a cent amount")]
    OutOfRange(Decimal),

    /// Arithmetic on two amounts overflowed
    #[error("money arithmetic overflowed")]
    Overflow,
}

/// An amount of money in major units (dollars), backed by an exact decimal.
///
/// The command side accepts amounts in major units while the query side
/// reports balances in minor units; [`Dollars::in_cents`] is the single
/// conversion point between the two and never rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dollars(pub Decimal);

impl Dollars {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Convert to minor units, exactly.
    ///
    /// Fails rather than rounds when the amount carries sub-cent precision:
    /// 1.23 converts to 123, 1.234 is an error.
    pub fn in_cents(self) -> Result<Cents, MoneyError> {
        let cents = self
            .0
            .checked_mul(Decimal::from(100))
            .ok_or(MoneyError::OutOfRange(self.0))?;
        if !cents.fract().is_zero() {
            return Err(MoneyError::FractionalCents(self.0));
        }
        cents
            .to_i64()
            .map(Cents)
            .ok_or(MoneyError::OutOfRange(self.0))
    }

    pub fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    pub fn checked_sub(self, other: Self) -> Result<Self, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }
}

impl From<i64> for Dollars {
    fn from(amount: i64) -> Self {
        Self(Decimal::from(amount))
    }
}

impl fmt::Display for Dollars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of money in minor units (cents), as reported by the query side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_dollars_convert_exactly() {
        assert_eq!(Dollars::from(500).in_cents().unwrap(), Cents(50_000));
        assert_eq!(Dollars::from(100).in_cents().unwrap(), Cents(10_000));
        assert_eq!(Dollars::from(150).in_cents().unwrap(), Cents(15_000));
    }

    #[test]
    fn fractional_dollars_convert_exactly() {
        let amount = Dollars::new(Decimal::new(123, 2)); // 1.23
        assert_eq!(amount.in_cents().unwrap(), Cents(123));
    }

    #[test]
    fn sub_cent_precision_is_rejected_not_rounded() {
        let amount = Dollars::new(Decimal::new(1234, 3)); // 1.234
        assert_eq!(
            amount.in_cents().unwrap_err(),
            MoneyError::FractionalCents(Decimal::new(1234, 3))
        );
    }

    #[test]
    fn negative_amounts_convert() {
        assert_eq!(Dollars::from(-150).in_cents().unwrap(), Cents(-15_000));
    }

    #[test]
    fn arithmetic_matches_transfer_expectations() {
        let from = Dollars::from(500);
        let to = Dollars::from(100);
        let amount = Dollars::from(150);

        assert_eq!(from.checked_sub(amount).unwrap(), Dollars::from(350));
        assert_eq!(to.checked_add(amount).unwrap(), Dollars::from(250));
    }

    #[test]
    fn serializes_as_plain_number() {
        // serde-float: amounts go over the wire as JSON numbers, not strings
        let json = serde_json::to_string(&Dollars::from(500)).unwrap();
        assert_eq!(json, "500.0");

        let json = serde_json::to_string(&Cents(35_000)).unwrap();
        assert_eq!(json, "35000");
    }

    #[test]
    fn cents_deserialize_from_query_side_shape() {
        let cents: Cents = serde_json::from_str("35000").unwrap();
        assert_eq!(cents, Cents(35_000));
    }
}
