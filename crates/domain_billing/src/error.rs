//! Billing domain errors

use core_kernel::{Money, MoneyError, TransactionId};
use thiserror::Error;

use crate::bill::BillStatus;
use crate::invoice::InvoiceStatus;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Bill or invoice dates are out of order
    #[error("invalid date range: {0}")]
    InvalidDateRange(&'static str),

    /// Close() on a bill that is already paid or closed
    #[error("bill is already {0}")]
    BillAlreadyTerminal(BillStatus),

    /// Reference month string does not parse as YYYY-MM
    #[error("invalid reference month, expected YYYY-MM format: {0:?}")]
    InvalidReferenceMonth(String),

    /// Mutation attempted on an invoice that is not open
    #[error("cannot modify a {0} invoice")]
    InvoiceNotOpen(InvoiceStatus),

    /// Transaction id is not tracked by the invoice
    #[error("transaction not found in invoice: {0}")]
    TransactionNotFound(TransactionId),

    /// MarkAsPaid() on an invoice that is already paid
    #[error("invoice is already paid")]
    InvoiceAlreadyPaid,

    /// MarkAsPaid() while the closing balance is still positive
    #[error("invoice still has outstanding balance of {0}")]
    OutstandingBalance(Money),
}
