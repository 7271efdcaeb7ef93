//! Transactions domain errors

use core_kernel::MoneyError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the transactions domain
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Shared expense percentage outside (0, 100]
    #[error("percentage must be greater than 0 and at most 100, got {0}")]
    InvalidPercentage(Decimal),

    /// Adding the share would push the total past 100%
    #[error("shared percentages would exceed 100%, total is already {total}%")]
    PercentageOverflow { total: Decimal },

    /// split_equally() with nobody to split with
    #[error("cannot split an expense with an empty person list")]
    EmptyPersonList,
}
