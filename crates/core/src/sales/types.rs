//! Sales aggregation data types.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use billora_shared::types::BillingId;

use crate::billing::types::BillingStatus;

/// Inclusive month window for sales aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesWindow {
    /// First year of the window.
    pub start_year: i32,
    /// First month of the window (1-12).
    pub start_month: u32,
    /// Last year of the window.
    pub end_year: i32,
    /// Last month of the window (1-12).
    pub end_month: u32,
}

impl SalesWindow {
    /// Creates a window from explicit bounds.
    #[must_use]
    pub const fn new(start_year: i32, start_month: u32, end_year: i32, end_month: u32) -> Self {
        Self {
            start_year,
            start_month,
            end_year,
            end_month,
        }
    }

    /// The default window: the trailing 12 months ending in `today`'s month.
    #[must_use]
    pub fn trailing_year(today: NaiveDate) -> Self {
        let end_year = today.year();
        let end_month = today.month();
        // Index months since year zero so the subtraction rolls years cleanly.
        #[allow(clippy::cast_possible_wrap)]
        let start_index = end_year * 12 + (end_month as i32 - 1) - 11;
        Self {
            start_year: start_index.div_euclid(12),
            start_month: u32::try_from(start_index.rem_euclid(12) + 1).unwrap_or(1),
            end_year,
            end_month,
        }
    }

    /// The ordered `(year, month)` sequence spanned by the window, inclusive.
    ///
    /// Returns an empty sequence when start is after end.
    #[must_use]
    pub fn months(&self) -> Vec<(i32, u32)> {
        let mut months = Vec::new();
        let (mut year, mut month) = (self.start_year, self.start_month);
        while (year, month) <= (self.end_year, self.end_month) {
            months.push((year, month));
            month += 1;
            if month > 12 {
                month = 1;
                year += 1;
            }
        }
        months
    }
}

/// One calendar-month bucket in the aggregation output.
///
/// Constructed fresh on every aggregation call; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySales {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Display label, `"YYYY/MM"` with a zero-padded month.
    pub label: String,
    /// Sum of applicable billing totals in this month.
    pub total_sales: Decimal,
    /// Number of billings counted in this month.
    pub invoice_count: u32,
    /// Per-client sales within the month, keyed by client display name.
    pub sales_by_client: BTreeMap<String, Decimal>,
}

impl MonthlySales {
    /// Creates an empty bucket for the given month.
    #[must_use]
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            label: format!("{year}/{month:02}"),
            total_sales: Decimal::ZERO,
            invoice_count: 0,
            sales_by_client: BTreeMap::new(),
        }
    }
}

/// Flattened, display-oriented projection of a billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    /// Billing identifier.
    pub id: BillingId,
    /// Display invoice number.
    pub invoice_number: String,
    /// Client display name.
    pub client_name: String,
    /// Issue date.
    pub issue_date: Option<NaiveDate>,
    /// Payment deadline.
    pub payment_deadline: Option<NaiveDate>,
    /// Display total (authoritative fallback chain).
    pub total: Decimal,
    /// Lifecycle status.
    pub status: BillingStatus,
}
