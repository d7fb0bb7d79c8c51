//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for storage operations, hiding
//! the backing store from the rest of the application.

pub mod billing;

pub use billing::{BillingFilter, BillingRepository, RepositoryError};
