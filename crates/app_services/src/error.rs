//! Service layer errors

use thiserror::Error;

use core_kernel::{MoneyError, PortError};
use domain_accounts::AccountsError;
use domain_billing::BillingError;
use domain_transactions::TransactionError;

/// Errors surfaced by the application services.
///
/// Domain and port errors pass through transparently so callers can
/// still match on the underlying cause.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Accounts(#[from] AccountsError),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Transactions(#[from] TransactionError),

    #[error(transparent)]
    Money(#[from] MoneyError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error("{0}")]
    Validation(String),
}

impl ServiceError {
    /// True when the underlying cause is a missing entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::Port(port) if port.is_not_found())
    }
}
