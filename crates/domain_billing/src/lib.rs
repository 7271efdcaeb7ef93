//! Billing Domain - Bills and Credit Card Invoices
//!
//! This crate implements the two payable obligations of the ledger:
//!
//! - **Bill**: an independent obligation with a start/end coverage window,
//!   a due date, a payment ledger, and a derived status state machine.
//! - **CreditCardInvoice**: a monthly statement for one card, aggregating
//!   charges and payments against a balance carried forward from the most
//!   recent closed invoice. The identity
//!   `closing = previous + charges - payments` holds after every mutation.
//!
//! [`ReferenceMonth`] is the `"YYYY-MM"` key that orders invoices and
//! drives statement-period arithmetic.

pub mod bill;
pub mod error;
pub mod invoice;
pub mod ports;

pub use bill::{Bill, BillStatus};
pub use error::BillingError;
pub use invoice::{CreditCardInvoice, InvoiceStatus, ReferenceMonth};
pub use ports::{BillPort, InvoicePort};
