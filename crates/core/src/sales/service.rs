//! Sales aggregation service.

use chrono::Datelike;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::billing::types::Billing;

use super::types::{InvoiceDetail, MonthlySales, SalesWindow};

/// Service for aggregating billing records into monthly read models.
///
/// All methods are pure projections: deterministic for identical inputs,
/// no mutation of the input billings, no ambient clock. Callers are
/// responsible for excluding `Planned` billings upstream; the service does
/// not re-filter status.
pub struct SalesService;

impl SalesService {
    /// Aggregates billings into one bucket per calendar month in `window`.
    ///
    /// Billings without an issue date, and billings whose issue month falls
    /// outside the window, are silently dropped. When `client_filter` is
    /// given, only billings whose client display name matches exactly are
    /// counted. Buckets are returned ascending by `(year, month)` with no
    /// gaps, each carrying per-client sub-totals whose sum equals the
    /// bucket's `total_sales`.
    #[must_use]
    pub fn aggregate_monthly_sales(
        billings: &[Billing],
        window: &SalesWindow,
        client_filter: Option<&str>,
    ) -> Vec<MonthlySales> {
        let mut buckets: BTreeMap<(i32, u32), MonthlySales> = window
            .months()
            .into_iter()
            .map(|(year, month)| ((year, month), MonthlySales::empty(year, month)))
            .collect();

        for billing in billings {
            if let Some(filter) = client_filter {
                if billing.client.name != filter {
                    continue;
                }
            }
            let Some(issue_date) = billing.issue_date else {
                continue;
            };
            let Some(bucket) = buckets.get_mut(&(issue_date.year(), issue_date.month())) else {
                continue;
            };

            let amount = billing.sales_amount();
            bucket.total_sales += amount;
            bucket.invoice_count += 1;
            *bucket
                .sales_by_client
                .entry(billing.client.name.clone())
                .or_insert(Decimal::ZERO) += amount;
        }

        buckets.into_values().collect()
    }

    /// Lists distinct non-empty client display names across all billings,
    /// regardless of status or date, in lexicographic order.
    #[must_use]
    pub fn client_names(billings: &[Billing]) -> Vec<String> {
        billings
            .iter()
            .map(|billing| billing.client.name.as_str())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Projects billings issued in the given `(year, month)` to invoice
    /// details, newest issue date first.
    #[must_use]
    pub fn invoices_for_month(
        billings: &[Billing],
        year: i32,
        month: u32,
        client_filter: Option<&str>,
    ) -> Vec<InvoiceDetail> {
        let mut details: Vec<InvoiceDetail> = billings
            .iter()
            .filter(|billing| {
                billing
                    .issue_date
                    .is_some_and(|d| d.year() == year && d.month() == month)
            })
            .filter(|billing| client_filter.is_none_or(|name| billing.client.name == name))
            .map(|billing| InvoiceDetail {
                id: billing.id,
                invoice_number: billing.invoice_number.clone(),
                client_name: billing.client.name.clone(),
                issue_date: billing.issue_date,
                payment_deadline: billing.payment_deadline,
                total: billing.total_amount(),
                status: billing.status,
            })
            .collect();

        sort_by_issue_date_desc(&mut details);
        details
    }
}

/// Sorts invoice details descending by issue date.
///
/// Details with a missing issue date sort after every dated entry,
/// regardless of the descending direction. This is an explicit rule, not a
/// side effect of date comparison.
pub fn sort_by_issue_date_desc(details: &mut [InvoiceDetail]) {
    details.sort_by(|a, b| match (a.issue_date, b.issue_date) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
