//! Persistence layer for Billora.
//!
//! This crate provides:
//! - The account-scoped `BillingRepository` boundary consumed by the API
//! - An in-memory reference implementation for development and tests
//!
//! Repositories hide storage details from the rest of the application.
//! Every call is scoped by `AccountId`; a billing read or write never
//! crosses account boundaries.

pub mod memory;
pub mod repositories;

pub use memory::InMemoryBillingStore;
pub use repositories::{BillingFilter, BillingRepository, RepositoryError};
