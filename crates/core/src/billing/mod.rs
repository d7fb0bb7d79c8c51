//! Billing lifecycle management.
//!
//! This module implements the billing status state machine and the
//! recurring-cycle side effect that drafts the next billing when a
//! recurring one is paid.
//!
//! # Modules
//!
//! - `types` - Billing domain types (Billing, BillingStatus, StatusChange)
//! - `error` - Billing-specific error types
//! - `lifecycle` - Status transition planning
//! - `recurrence` - Calendar-month arithmetic and successor drafting

pub mod error;
pub mod lifecycle;
pub mod recurrence;
pub mod types;

pub use error::BillingError;
pub use lifecycle::LifecycleService;
pub use types::{
    Billing, BillingStatus, ClientInfo, LineItem, NewBilling, RecurringInterval, StatusChange,
    StatusPatch,
};
