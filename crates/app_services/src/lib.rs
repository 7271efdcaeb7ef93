//! Application Services
//!
//! Use case orchestration over the domain ports. Each service takes its
//! port dependencies as `Arc<dyn ...Port>` at construction and exposes
//! the operations a front end would call.
//!
//! Writes are sequential with no transactional wrapping: a failure
//! mid-sequence leaves the earlier writes in place. The transaction
//! creation workflow additionally treats invoice and bill attachment as
//! best-effort, logging and swallowing their failures so the money
//! movement itself always lands.

pub mod accounts;
pub mod bills;
pub mod cards;
pub mod error;
pub mod invoices;
pub mod people;
pub mod reports;
pub mod transactions;

pub use accounts::AccountService;
pub use bills::BillService;
pub use cards::CreditCardService;
pub use error::ServiceError;
pub use invoices::InvoiceService;
pub use people::PersonService;
pub use reports::{BillReport, ReportService, SharedExpenseEntry, SharedExpenseReport};
pub use transactions::{TransactionDraft, TransactionService, TransactionSource};
