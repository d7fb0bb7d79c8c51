//! Billing lifecycle state transitions.
//!
//! This module plans status changes as pure data: the primary write plus
//! the side effects it triggers. Callers apply the plan against their
//! persistence and notification collaborators; the planner itself performs
//! no I/O and never reads the ambient clock.

use chrono::{DateTime, NaiveDate, Utc};

use super::error::BillingError;
use super::recurrence::build_successor;
use super::types::{Billing, BillingStatus, StatusChange, StatusPatch};

/// Stateless service for planning billing status transitions.
pub struct LifecycleService;

impl LifecycleService {
    /// Plans a status change for a billing.
    ///
    /// # Arguments
    /// * `billing` - The current billing record
    /// * `new_status` - The requested status
    /// * `payment_date` - Required when `new_status` is `Paid`
    /// * `now` - The caller's clock, used for successor dates and numbering
    ///
    /// # Returns
    /// The planned primary write plus side effects:
    /// - a "sent" notification when moving to `Sent` (fire-and-forget), and
    /// - exactly one `Planned` successor draft when a recurring billing with
    ///   a valid interval moves to `Paid`.
    ///
    /// # Errors
    /// `BillingError::PaymentDateRequired` when `new_status` is `Paid` and no
    /// payment date was supplied. The date is never silently defaulted.
    pub fn plan_status_change(
        billing: &Billing,
        new_status: BillingStatus,
        payment_date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<StatusChange, BillingError> {
        let patch = match new_status {
            BillingStatus::Paid => {
                let Some(paid_on) = payment_date else {
                    return Err(BillingError::PaymentDateRequired);
                };
                StatusPatch {
                    status: new_status,
                    payment_date: Some(paid_on),
                }
            }
            _ => StatusPatch {
                status: new_status,
                payment_date,
            },
        };

        let successor = if new_status == BillingStatus::Paid {
            billing
                .effective_interval()
                .map(|interval| build_successor(billing, interval, now))
        } else {
            None
        };

        Ok(StatusChange {
            patch,
            notify_sent: new_status == BillingStatus::Sent,
            successor,
        })
    }
}
