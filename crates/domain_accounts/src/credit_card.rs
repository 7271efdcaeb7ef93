//! Credit cards with limit enforcement and payment clamping

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, CreditCardId, Money, MoneyError};

use crate::error::AccountsError;

/// A revolving-credit instrument linked to an owning account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    /// Unique identifier
    pub id: CreditCardId,
    /// Owning account (required link, stored as a weak id reference)
    pub account_id: AccountId,
    /// Card name
    pub name: String,
    /// Last four digits of the card number
    pub last_four_digits: String,
    /// Hard credit limit
    pub credit_limit: Money,
    /// Running balance; never exceeds the limit, never negative
    pub current_balance: Money,
    /// Day of the month the statement is due, 1..=31
    pub due_day: u8,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl CreditCard {
    /// Creates a new card against an existing account.
    ///
    /// Validates `due_day` is within 1..=31 and `last_four_digits` is
    /// exactly 4 characters. The balance starts at zero in the limit's
    /// currency.
    pub fn new(
        account_id: AccountId,
        name: impl Into<String>,
        last_four_digits: impl Into<String>,
        credit_limit: Money,
        due_day: u8,
    ) -> Result<Self, AccountsError> {
        if !(1..=31).contains(&due_day) {
            return Err(AccountsError::InvalidDueDay(due_day));
        }

        let last_four_digits = last_four_digits.into();
        if last_four_digits.len() != 4 {
            return Err(AccountsError::InvalidLastFourDigits(last_four_digits));
        }

        let current_balance = Money::zero(credit_limit.currency().clone());
        let now = Utc::now();
        Ok(Self {
            id: CreditCardId::new(),
            account_id,
            name: name.into(),
            last_four_digits,
            credit_limit,
            current_balance,
            due_day,
            created_at: now,
            updated_at: now,
        })
    }

    /// Adds a charge to the card.
    ///
    /// Fails with `CreditLimitExceeded` if the new balance would pass the
    /// limit; the balance is unchanged on failure.
    pub fn charge(&mut self, amount: &Money) -> Result<(), AccountsError> {
        let new_balance = self.current_balance.checked_add(amount)?;
        let available = self.credit_limit.checked_sub(&new_balance)?;
        if available.is_negative() {
            return Err(AccountsError::CreditLimitExceeded {
                limit: self.credit_limit.clone(),
                attempted: new_balance,
            });
        }
        self.current_balance = new_balance;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Applies a payment to the card.
    ///
    /// A payment larger than the balance clamps to zero; the overpayment
    /// is absorbed, not tracked as a credit balance.
    pub fn payment(&mut self, amount: &Money) -> Result<(), AccountsError> {
        let new_balance = self.current_balance.checked_sub(amount)?;
        self.current_balance = if new_balance.is_negative() {
            Money::zero(self.current_balance.currency().clone())
        } else {
            new_balance
        };
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Returns the credit still available on the card
    pub fn available_credit(&self) -> Result<Money, MoneyError> {
        self.credit_limit.checked_sub(&self.current_balance)
    }

    /// Returns utilization as a percentage of the limit; 0 for a zero limit
    pub fn utilization_percentage(&self) -> Decimal {
        if self.credit_limit.is_zero() {
            return Decimal::ZERO;
        }
        self.current_balance.amount() / self.credit_limit.amount() * dec!(100)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use core_kernel::Currency;
    use proptest::prelude::*;

    proptest! {
        // The limit invariant holds across any sequence of charges: the
        // charge that would exceed the limit fails and the balance at
        // every step stays within it.
        #[test]
        fn balance_never_exceeds_limit(charges in proptest::collection::vec(1i64..200_000i64, 1..30)) {
            let limit = Money::from_minor(500_000, Currency::brl());
            let mut card = CreditCard::new(AccountId::new(), "Visa", "9999", limit.clone(), 15).unwrap();

            for cents in charges {
                let amount = Money::from_minor(cents, Currency::brl());
                let before = card.current_balance.clone();
                match card.charge(&amount) {
                    Ok(()) => {}
                    Err(_) => prop_assert_eq!(&card.current_balance, &before),
                }
                prop_assert!(!limit.checked_sub(&card.current_balance).unwrap().is_negative());
            }
        }
    }
}
