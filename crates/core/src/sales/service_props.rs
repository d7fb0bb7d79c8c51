//! Property-based tests for SalesService.
//!
//! - Bucket completeness: every month in the window appears exactly once,
//!   ascending, no gaps
//! - Window sum: bucket totals add up to the in-window billing totals
//! - Per-client sub-totals: each bucket's client map sums to its total

use chrono::{Datelike, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use billora_shared::types::{AccountId, BillingId};

use crate::billing::types::{Billing, BillingStatus, ClientInfo};

use super::service::SalesService;
use super::types::SalesWindow;

/// Strategy to generate decimal amounts (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a client name from a small pool.
fn client_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Acme".to_string()),
        Just("Globex".to_string()),
        Just("Initech".to_string()),
        Just("Umbrella".to_string()),
    ]
}

/// Strategy to generate an issue date between 2024-01 and 2027-12,
/// or none at all.
fn issue_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop_oneof![
        1 => Just(None),
        9 => (2024i32..=2027, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d)
        }),
    ]
}

/// Strategy to generate one billing record.
fn billing_strategy() -> impl Strategy<Value = Billing> {
    (1i64..10_000, client_name(), issue_date(), amount()).prop_map(
        |(id, client, issue, total)| Billing {
            id: BillingId::from_i64(id),
            account_id: AccountId::from_i64(1),
            status: BillingStatus::Sent,
            issue_date: issue,
            payment_deadline: None,
            payment_date: None,
            amount: None,
            subtotal: None,
            tax_total: None,
            total: Some(total),
            items: vec![],
            client: ClientInfo { name: client },
            contract_id: None,
            invoice_number: format!("INV-{id:04}"),
            is_recurring: false,
            recurring_interval: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
    )
}

/// Strategy to generate a window no wider than three years.
fn window_strategy() -> impl Strategy<Value = SalesWindow> {
    (2024i32..=2027, 1u32..=12, 0u32..36).prop_map(|(start_year, start_month, span)| {
        #[allow(clippy::cast_possible_wrap)]
        let end_index = start_year * 12 + (start_month as i32 - 1) + span as i32;
        SalesWindow {
            start_year,
            start_month,
            end_year: end_index.div_euclid(12),
            end_month: u32::try_from(end_index.rem_euclid(12) + 1).unwrap_or(1),
        }
    })
}

fn in_window(window: &SalesWindow, date: NaiveDate) -> bool {
    let key = (date.year(), date.month());
    key >= (window.start_year, window.start_month) && key <= (window.end_year, window.end_month)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any window, the output contains exactly the months spanned,
    /// ascending, with no gaps or duplicates.
    #[test]
    fn prop_bucket_completeness(
        billings in prop::collection::vec(billing_strategy(), 0..40),
        window in window_strategy(),
    ) {
        let buckets = SalesService::aggregate_monthly_sales(&billings, &window, None);
        let expected = window.months();

        prop_assert_eq!(buckets.len(), expected.len());
        for (bucket, (year, month)) in buckets.iter().zip(expected) {
            prop_assert_eq!(bucket.year, year);
            prop_assert_eq!(bucket.month, month);
            prop_assert_eq!(&bucket.label, &format!("{year}/{month:02}"));
        }
    }

    /// The sum over all buckets equals the sum of `total ?? amount ?? 0`
    /// over exactly the billings whose issue date falls inside the window.
    #[test]
    fn prop_window_sum_invariant(
        billings in prop::collection::vec(billing_strategy(), 0..40),
        window in window_strategy(),
    ) {
        let buckets = SalesService::aggregate_monthly_sales(&billings, &window, None);

        let bucket_sum: Decimal = buckets.iter().map(|b| b.total_sales).sum();
        let expected: Decimal = billings
            .iter()
            .filter(|b| b.issue_date.is_some_and(|d| in_window(&window, d)))
            .map(Billing::sales_amount)
            .sum();

        prop_assert_eq!(bucket_sum, expected);
    }

    /// Per bucket, the per-client sub-totals sum to the bucket total, and
    /// the invoice counts add up across buckets to the in-window count.
    #[test]
    fn prop_client_subtotal_invariant(
        billings in prop::collection::vec(billing_strategy(), 0..40),
        window in window_strategy(),
    ) {
        let buckets = SalesService::aggregate_monthly_sales(&billings, &window, None);

        for bucket in &buckets {
            let client_sum: Decimal = bucket.sales_by_client.values().copied().sum();
            prop_assert_eq!(client_sum, bucket.total_sales);
        }

        let counted: u32 = buckets.iter().map(|b| b.invoice_count).sum();
        let expected = billings
            .iter()
            .filter(|b| b.issue_date.is_some_and(|d| in_window(&window, d)))
            .count();
        prop_assert_eq!(counted as usize, expected);
    }

    /// Filtering by client never changes the relationship between the
    /// filtered aggregate and that client's sub-totals in the unfiltered one.
    #[test]
    fn prop_client_filter_matches_subtotals(
        billings in prop::collection::vec(billing_strategy(), 0..40),
        window in window_strategy(),
    ) {
        let all = SalesService::aggregate_monthly_sales(&billings, &window, None);
        let filtered = SalesService::aggregate_monthly_sales(&billings, &window, Some("Acme"));

        prop_assert_eq!(all.len(), filtered.len());
        for (unfiltered, scoped) in all.iter().zip(&filtered) {
            let expected = unfiltered
                .sales_by_client
                .get("Acme")
                .copied()
                .unwrap_or(Decimal::ZERO);
            prop_assert_eq!(scoped.total_sales, expected);
        }
    }
}
