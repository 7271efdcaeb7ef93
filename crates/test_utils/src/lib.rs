//! Shared test support for the ledger workspace
//!
//! Fixtures provide consistent, predictable values; builders construct
//! entities with sensible defaults so tests only spell out the fields
//! they care about.

pub mod builders;
pub mod fixtures;

pub use builders::{BillBuilder, CreditCardBuilder, InvoiceBuilder, TransactionBuilder};
pub use fixtures::{brl, day, DateFixtures, MoneyFixtures};
