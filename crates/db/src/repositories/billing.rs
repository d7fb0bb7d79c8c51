//! Billing repository boundary.

use async_trait::async_trait;

use billora_core::billing::types::{Billing, BillingStatus, NewBilling, StatusPatch};
use billora_shared::types::{AccountId, BillingId};

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No billing with the given id exists within the caller's account.
    ///
    /// Cross-account lookups surface as this variant too; the store never
    /// reveals whether a record exists under another account.
    #[error("Billing {0} not found")]
    NotFound(BillingId),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Filter for listing billings.
#[derive(Debug, Clone, Copy, Default)]
pub struct BillingFilter {
    /// Keep only billings with this status.
    pub status: Option<BillingStatus>,
    /// Drop billings with this status (used to exclude `Planned` from
    /// reporting queries).
    pub exclude_status: Option<BillingStatus>,
}

impl BillingFilter {
    /// Returns true when the billing passes the filter.
    #[must_use]
    pub fn matches(&self, billing: &Billing) -> bool {
        if let Some(status) = self.status {
            if billing.status != status {
                return false;
            }
        }
        if let Some(excluded) = self.exclude_status {
            if billing.status == excluded {
                return false;
            }
        }
        true
    }
}

/// Account-scoped billing storage.
///
/// Every method takes the owning `AccountId`; implementations must reject
/// or filter any access that crosses account boundaries. This is the
/// authorization invariant of the persistence layer, not an optional filter.
#[async_trait]
pub trait BillingRepository: Send + Sync {
    /// Fetches one billing by id within the account.
    async fn find_by_id(
        &self,
        account_id: AccountId,
        id: BillingId,
    ) -> Result<Option<Billing>, RepositoryError>;

    /// Applies a status patch to an existing billing and returns the
    /// updated record.
    async fn update_status(
        &self,
        account_id: AccountId,
        id: BillingId,
        patch: StatusPatch,
    ) -> Result<Billing, RepositoryError>;

    /// Inserts a new billing, assigning identity and timestamps.
    async fn insert(
        &self,
        account_id: AccountId,
        billing: NewBilling,
    ) -> Result<Billing, RepositoryError>;

    /// Lists the account's billings matching the filter.
    async fn list(
        &self,
        account_id: AccountId,
        filter: BillingFilter,
    ) -> Result<Vec<Billing>, RepositoryError>;
}
