//! Accounts domain errors

use core_kernel::{Money, MoneyError};
use thiserror::Error;

/// Errors that can occur in the accounts domain
#[derive(Debug, Error)]
pub enum AccountsError {
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A withdrawal would overdraw a non-checking account
    #[error("insufficient funds: balance would be {would_be}")]
    InsufficientFunds { would_be: Money },

    /// Card due day outside the calendar range
    #[error("due day must be between 1 and 31, got {0}")]
    InvalidDueDay(u8),

    /// Card digits are not exactly four characters
    #[error("last four digits must be exactly 4 characters, got {0:?}")]
    InvalidLastFourDigits(String),

    /// A charge would push the balance past the credit limit
    #[error("credit limit exceeded: limit is {limit}, balance would be {attempted}")]
    CreditLimitExceeded { limit: Money, attempted: Money },
}
