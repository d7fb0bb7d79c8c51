//! Core business logic for Billora.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `billing` - Billing records, the status lifecycle, and recurring cycles
//! - `sales` - Monthly sales aggregation and invoice projections

pub mod billing;
pub mod sales;
