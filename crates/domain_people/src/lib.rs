//! People Domain
//!
//! People are the participants that shared expenses are split with.
//! Transactions reference them by [`core_kernel::PersonId`] only, so
//! deleting a person leaves any existing shares pointing at a gone id.

pub mod person;
pub mod ports;

pub use person::Person;
pub use ports::PersonPort;
