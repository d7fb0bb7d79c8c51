//! Monthly sales aggregation.
//!
//! This module provides pure read-model projections over billing records:
//! - Month-bucketed revenue and invoice counts (with per-client sub-totals)
//! - Distinct client names for filter choices
//! - Per-month invoice detail listings

pub mod service;
pub mod types;


#[cfg(test)]
mod service_props;

pub use service::SalesService;
pub use types::{InvoiceDetail, MonthlySales, SalesWindow};
