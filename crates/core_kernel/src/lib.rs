//! Core Kernel - Foundational types for the finance ledger
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money with precise decimal arithmetic rounded to cents
//! - Strongly-typed entity identifiers
//! - Port error and marker types for the persistence boundary

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{AccountId, BillId, CreditCardId, InvoiceId, PersonId, TransactionId};
pub use money::{Currency, Money, MoneyError};
pub use ports::{DomainPort, PortError};
