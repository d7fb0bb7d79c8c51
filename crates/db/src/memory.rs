//! In-memory billing store.
//!
//! Reference implementation of [`BillingRepository`] for development and
//! tests. A production deployment plugs a relational store into the same
//! trait; the account-scoping rules here are the contract either way.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use tokio::sync::RwLock;

use async_trait::async_trait;

use billora_core::billing::types::{Billing, NewBilling, StatusPatch};
use billora_shared::types::{AccountId, BillingId};

use crate::repositories::billing::{BillingFilter, BillingRepository, RepositoryError};

/// Thread-safe in-memory billing store with a monotonic id sequence.
#[derive(Debug, Default)]
pub struct InMemoryBillingStore {
    billings: RwLock<HashMap<BillingId, Billing>>,
    next_id: AtomicI64,
}

impl InMemoryBillingStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            billings: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    fn allocate_id(&self) -> BillingId {
        BillingId::from_i64(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl BillingRepository for InMemoryBillingStore {
    async fn find_by_id(
        &self,
        account_id: AccountId,
        id: BillingId,
    ) -> Result<Option<Billing>, RepositoryError> {
        let billings = self.billings.read().await;
        Ok(billings
            .get(&id)
            .filter(|billing| billing.account_id == account_id)
            .cloned())
    }

    async fn update_status(
        &self,
        account_id: AccountId,
        id: BillingId,
        patch: StatusPatch,
    ) -> Result<Billing, RepositoryError> {
        let mut billings = self.billings.write().await;
        let billing = billings
            .get_mut(&id)
            .filter(|billing| billing.account_id == account_id)
            .ok_or(RepositoryError::NotFound(id))?;

        billing.status = patch.status;
        if let Some(paid_on) = patch.payment_date {
            billing.payment_date = Some(paid_on);
        }
        billing.updated_at = Utc::now();
        Ok(billing.clone())
    }

    async fn insert(
        &self,
        account_id: AccountId,
        billing: NewBilling,
    ) -> Result<Billing, RepositoryError> {
        let id = self.allocate_id();
        let now = Utc::now();
        let record = Billing {
            id,
            account_id,
            status: billing.status,
            issue_date: billing.issue_date,
            payment_deadline: billing.payment_deadline,
            payment_date: billing.payment_date,
            amount: billing.amount,
            subtotal: billing.subtotal,
            tax_total: billing.tax_total,
            total: billing.total,
            items: billing.items,
            client: billing.client,
            contract_id: billing.contract_id,
            invoice_number: billing.invoice_number,
            is_recurring: billing.is_recurring,
            recurring_interval: billing.recurring_interval,
            created_at: now,
            updated_at: now,
        };

        let mut billings = self.billings.write().await;
        billings.insert(id, record.clone());
        Ok(record)
    }

    async fn list(
        &self,
        account_id: AccountId,
        filter: BillingFilter,
    ) -> Result<Vec<Billing>, RepositoryError> {
        let billings = self.billings.read().await;
        let mut matching: Vec<Billing> = billings
            .values()
            .filter(|billing| billing.account_id == account_id)
            .filter(|billing| filter.matches(billing))
            .cloned()
            .collect();
        matching.sort_by_key(|billing| billing.id);
        Ok(matching)
    }
}
