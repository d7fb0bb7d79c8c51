//! Billing domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use billora_shared::types::{AccountId, BillingId, ContractId};

/// Billing status in the invoice lifecycle.
///
/// The intended lifecycle is linear:
/// Planned → Approved → Sent → Paid.
///
/// The data layer does not enforce forward-only ordering; any status is
/// settable through a direct update. `Paid` is terminal except for the
/// recurring-successor side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BillingStatus {
    /// Billing is drafted but not yet real for reporting purposes.
    Planned,
    /// Billing has been approved internally.
    Approved,
    /// Billing has been sent to the client.
    Sent,
    /// Billing has been paid (requires a payment date).
    Paid,
}

impl BillingStatus {
    /// Returns the wire representation of the status.
    ///
    /// These four case-sensitive strings are the canonical wire values;
    /// display localization happens in the presentation layer.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::Approved => "Approved",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
        }
    }

    /// Parses a status from its exact wire value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Planned" => Some(Self::Planned),
            "Approved" => Some(Self::Approved),
            "Sent" => Some(Self::Sent),
            "Paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Interval at which a recurring billing spawns its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringInterval {
    /// Every calendar month.
    Monthly,
    /// Every three calendar months.
    Quarterly,
    /// Every twelve calendar months.
    Yearly,
}

impl RecurringInterval {
    /// Number of calendar months the interval advances by.
    #[must_use]
    pub const fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Yearly => 12,
        }
    }

    /// Parses an interval from its wire value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for RecurringInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        };
        write!(f, "{s}")
    }
}

/// One line item on a billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description.
    pub description: String,
    /// Quantity.
    pub quantity: Decimal,
    /// Unit label (e.g., "hours", "pcs").
    pub unit: String,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Tax rate applied to this line.
    pub tax_rate: Decimal,
}

/// Denormalized client snapshot carried on each billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Client display name.
    pub name: String,
}

/// One invoice/bill tracked through the status lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Billing {
    /// Unique identifier, immutable once created.
    pub id: BillingId,
    /// Owning account; every read and write is scoped by it.
    pub account_id: AccountId,
    /// Current lifecycle status.
    pub status: BillingStatus,
    /// Issue date.
    pub issue_date: Option<NaiveDate>,
    /// Payment deadline.
    pub payment_deadline: Option<NaiveDate>,
    /// Payment date, set only when paid.
    pub payment_date: Option<NaiveDate>,
    /// Legacy flat total, kept for records created before itemized totals.
    pub amount: Option<Decimal>,
    /// Sum of line items before tax.
    pub subtotal: Option<Decimal>,
    /// Total tax split by rate.
    pub tax_total: Option<Decimal>,
    /// Authoritative final amount.
    pub total: Option<Decimal>,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Denormalized client snapshot.
    pub client: ClientInfo,
    /// Weak reference to a contract (lookup-only, no ownership).
    pub contract_id: Option<ContractId>,
    /// Display invoice number; advisory, not guaranteed unique.
    pub invoice_number: String,
    /// Whether this billing spawns a successor when paid.
    pub is_recurring: bool,
    /// Recurring interval; meaningful only when `is_recurring` is true.
    pub recurring_interval: Option<RecurringInterval>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Billing {
    /// The display total: `total`, else `subtotal + tax_total`, else the
    /// legacy `amount`, else zero.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        if let Some(total) = self.total {
            return total;
        }
        if self.subtotal.is_some() || self.tax_total.is_some() {
            return self.subtotal.unwrap_or(Decimal::ZERO)
                + self.tax_total.unwrap_or(Decimal::ZERO);
        }
        self.amount.unwrap_or(Decimal::ZERO)
    }

    /// The amount counted by sales aggregation: `total ?? amount ?? 0`.
    ///
    /// The aggregation deliberately skips the subtotal fallback; records
    /// without a stored total count only their legacy flat amount.
    #[must_use]
    pub fn sales_amount(&self) -> Decimal {
        self.total.or(self.amount).unwrap_or(Decimal::ZERO)
    }

    /// The recurring interval, treating it as absent unless the billing is
    /// actually flagged recurring.
    #[must_use]
    pub fn effective_interval(&self) -> Option<RecurringInterval> {
        if self.is_recurring {
            self.recurring_interval
        } else {
            None
        }
    }
}

/// Insert payload for a new billing; the store assigns identity and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBilling {
    /// Initial lifecycle status.
    pub status: BillingStatus,
    /// Issue date.
    pub issue_date: Option<NaiveDate>,
    /// Payment deadline.
    pub payment_deadline: Option<NaiveDate>,
    /// Payment date.
    pub payment_date: Option<NaiveDate>,
    /// Legacy flat total.
    pub amount: Option<Decimal>,
    /// Sum of line items before tax.
    pub subtotal: Option<Decimal>,
    /// Total tax split by rate.
    pub tax_total: Option<Decimal>,
    /// Authoritative final amount.
    pub total: Option<Decimal>,
    /// Ordered line items.
    pub items: Vec<LineItem>,
    /// Denormalized client snapshot.
    pub client: ClientInfo,
    /// Weak reference to a contract.
    pub contract_id: Option<ContractId>,
    /// Display invoice number.
    pub invoice_number: String,
    /// Whether this billing spawns a successor when paid.
    pub is_recurring: bool,
    /// Recurring interval.
    pub recurring_interval: Option<RecurringInterval>,
}

/// The primary write of a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPatch {
    /// The new status to persist.
    pub status: BillingStatus,
    /// Payment date to persist alongside a `Paid` transition.
    pub payment_date: Option<NaiveDate>,
}

/// A planned status change: the primary write plus its side effects.
///
/// The successor insert is explicitly non-atomic with the primary write;
/// callers apply the patch first and then attempt the side effects on their
/// own error channels.
#[derive(Debug, Clone)]
pub struct StatusChange {
    /// The primary write.
    pub patch: StatusPatch,
    /// Whether the "billing sent" notification fires (fire-and-forget).
    pub notify_sent: bool,
    /// Successor draft to insert when a recurring billing was paid.
    pub successor: Option<NewBilling>,
}
