//! Transactions Domain
//!
//! A [`Transaction`] is a single ledger movement: a debit or credit of
//! some amount, on some date, in a category, optionally funded by an
//! account or a credit card and optionally attached to a bill or an
//! invoice. All cross-aggregate links are weak id references.
//!
//! Shared expenses split a transaction's amount across people by
//! percentage, capped at 100% in total.

pub mod error;
pub mod ports;
pub mod transaction;

pub use error::TransactionError;
pub use ports::TransactionPort;
pub use transaction::{Category, SharedExpense, Transaction, TransactionKind};
