//! Accounts Domain - Funds and Revolving Credit
//!
//! This crate implements the two stores of value in the ledger:
//!
//! - **Account**: a bank-like store of funds whose overdraft policy is keyed
//!   on the account kind (only checking accounts may go negative).
//! - **CreditCard**: a revolving-credit instrument linked to an account,
//!   with a hard credit limit and a running balance that payments clamp
//!   at zero.
//!
//! Port traits for the persistence collaborator live in [`ports`], with
//! in-memory mock adapters behind the `mock` feature.

pub mod account;
pub mod credit_card;
pub mod error;
pub mod ports;

pub use account::{Account, AccountKind};
pub use credit_card::CreditCard;
pub use error::AccountsError;
pub use ports::{AccountPort, CreditCardPort};
