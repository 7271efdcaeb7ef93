//! Money with precise decimal arithmetic
//!
//! This module provides a currency-tagged monetary value backed by
//! rust_decimal. Amounts are rounded to cents at construction, so equality
//! is exact and no epsilon tolerance is needed anywhere downstream.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A currency code attached to every monetary amount.
///
/// Codes are stored verbatim; there is no validation against the ISO 4217
/// list. `"BRL"` gets special rendering in [`Money`]'s display output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Creates a currency from a code, stored as given
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The Brazilian real, the default currency of the ledger
    pub fn brl() -> Self {
        Self("BRL".to_string())
    }

    /// Returns the currency code
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("cannot operate on different currencies: {0} and {1}")]
    CurrencyMismatch(Currency, Currency),
}

/// A monetary amount with associated currency.
///
/// Amounts are rounded to 2 decimal places using half-away-from-zero
/// rounding whenever a `Money` is produced, including the results of
/// arithmetic. Equality compares the rounded amount and the currency
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value, rounding the amount to cents
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            currency,
        }
    }

    /// Creates Money from an integer amount of cents
    pub fn from_minor(minor_units: i64, currency: Currency) -> Self {
        Self::new(Decimal::new(minor_units, 2), currency)
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount, already rounded to cents
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Checked addition that returns an error on currency mismatch
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount + other.amount, self.currency.clone()))
    }

    /// Checked subtraction that returns an error on currency mismatch
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(Self::new(self.amount - other.amount, self.currency.clone()))
    }

    /// Scales the amount by an arbitrary factor (e.g., for percentage splits)
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount * factor, self.currency.clone())
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.clone(),
                other.currency.clone(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.currency.code() == "BRL" {
            write!(f, "R$ {:.2}", self.amount)
        } else {
            write!(f, "{} {:.2}", self.currency, self.amount)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn addition_is_commutative(a in -1_000_000i64..1_000_000i64, b in -1_000_000i64..1_000_000i64) {
            let ma = Money::from_minor(a, Currency::brl());
            let mb = Money::from_minor(b, Currency::brl());

            prop_assert_eq!(ma.checked_add(&mb).unwrap(), mb.checked_add(&ma).unwrap());
        }

        #[test]
        fn subtraction_reverses_addition(a in -1_000_000i64..1_000_000i64, b in -1_000_000i64..1_000_000i64) {
            let ma = Money::from_minor(a, Currency::brl());
            let mb = Money::from_minor(b, Currency::brl());

            let sum = ma.checked_add(&mb).unwrap();
            prop_assert_eq!(sum.checked_sub(&mb).unwrap(), ma);
        }

        #[test]
        fn amount_always_has_at_most_two_decimals(cents in -10_000_000i64..10_000_000i64) {
            let m = Money::from_minor(cents, Currency::brl());
            prop_assert_eq!(m.amount().round_dp(2), m.amount());
        }
    }
}
