//! Calendar-month arithmetic and recurring successor drafting.

use chrono::{DateTime, Months, NaiveDate, Utc};

use super::types::{Billing, BillingStatus, NewBilling, RecurringInterval};

/// Advances a date by whole calendar months, clamping end-of-month overflow.
///
/// The day of month is preserved where valid; when the target month is
/// shorter, the result clamps to its last day (Jan 31 + 1 month = Feb 28,
/// or Feb 29 in a leap year). Overflow is never allowed to roll into the
/// following month.
#[must_use]
pub fn advance_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Generates an auto invoice number of the form `INV-AUTO-XXXX`.
///
/// The four-digit suffix is derived from the timestamp. Purely advisory:
/// collisions are possible and not detected.
#[must_use]
pub fn auto_invoice_number(now: DateTime<Utc>) -> String {
    let suffix = now.timestamp_millis().rem_euclid(10_000);
    format!("INV-AUTO-{suffix:04}")
}

/// Drafts the successor billing for the next recurring cycle.
///
/// All fields are cloned from the original except:
/// - identity and timestamps (assigned by the store),
/// - `invoice_number` (regenerated),
/// - `status` (forced to `Planned`),
/// - `payment_date` (cleared),
/// - `issue_date` and `payment_deadline` (advanced by the interval; when
///   the original date is absent, the offset starts from `now`).
#[must_use]
pub fn build_successor(
    billing: &Billing,
    interval: RecurringInterval,
    now: DateTime<Utc>,
) -> NewBilling {
    let today = now.date_naive();
    let months = interval.months();

    NewBilling {
        status: BillingStatus::Planned,
        issue_date: Some(advance_months(billing.issue_date.unwrap_or(today), months)),
        payment_deadline: Some(advance_months(
            billing.payment_deadline.unwrap_or(today),
            months,
        )),
        payment_date: None,
        amount: billing.amount,
        subtotal: billing.subtotal,
        tax_total: billing.tax_total,
        total: billing.total,
        items: billing.items.clone(),
        client: billing.client.clone(),
        contract_id: billing.contract_id,
        invoice_number: auto_invoice_number(now),
        is_recurring: billing.is_recurring,
        recurring_interval: billing.recurring_interval,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2026, 1, 15), 1, date(2026, 2, 15))]
    #[case(date(2026, 1, 31), 1, date(2026, 2, 28))]
    #[case(date(2028, 1, 31), 1, date(2028, 2, 29))] // leap year
    #[case(date(2026, 3, 31), 3, date(2026, 6, 30))]
    #[case(date(2026, 11, 30), 3, date(2027, 2, 28))]
    #[case(date(2026, 2, 28), 12, date(2027, 2, 28))]
    #[case(date(2026, 12, 31), 1, date(2027, 1, 31))]
    fn test_advance_months_clamps_end_of_month(
        #[case] start: NaiveDate,
        #[case] months: u32,
        #[case] expected: NaiveDate,
    ) {
        assert_eq!(advance_months(start, months), expected);
    }

    #[test]
    fn test_auto_invoice_number_format() {
        let now = DateTime::from_timestamp(1_767_225_600, 123_000_000).unwrap();
        let number = auto_invoice_number(now);
        assert!(number.starts_with("INV-AUTO-"));
        assert_eq!(number.len(), "INV-AUTO-0000".len());
        assert!(number["INV-AUTO-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_auto_invoice_number_is_zero_padded() {
        // 1_700_000_000s + 3ms -> millis suffix 0003
        let now = DateTime::from_timestamp(1_700_000_000, 3_000_000).unwrap();
        assert_eq!(auto_invoice_number(now), "INV-AUTO-0003");
    }
}
