//! Billing management routes.
//!
//! The status-update handler orchestrates the lifecycle plan against the
//! repository and notification collaborators: the primary status write
//! either succeeds or fails the request, while the "sent" notification and
//! the recurring-successor insert are best-effort side effects that are
//! logged and never roll back the primary write.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::AppState;
use billora_core::billing::{
    BillingError, LifecycleService,
    types::{Billing, BillingStatus},
};
use billora_db::{BillingFilter, RepositoryError};
use billora_shared::AppError;
use billora_shared::types::{AccountId, BillingId};

/// Creates the billing routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts/{account_id}/billings", get(list_billings))
        .route(
            "/accounts/{account_id}/billings/{billing_id}/status",
            put(set_status),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing billings.
#[derive(Debug, Deserialize)]
pub struct ListBillingsQuery {
    /// Keep only billings with this status (exact wire value).
    pub status: Option<String>,
    /// Drop billings with this status (exact wire value).
    pub exclude_status: Option<String>,
}

/// Request body for a status update.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// The new status (one of the four wire values).
    pub status: BillingStatus,
    /// Payment date; required when `status` is `Paid`.
    pub payment_date: Option<NaiveDate>,
}

/// Response for a single billing.
#[derive(Debug, Serialize)]
pub struct BillingResponse {
    /// Billing ID.
    pub id: BillingId,
    /// Display invoice number.
    pub invoice_number: String,
    /// Client display name.
    pub client_name: String,
    /// Lifecycle status.
    pub status: &'static str,
    /// Issue date (YYYY-MM-DD).
    pub issue_date: Option<String>,
    /// Payment deadline (YYYY-MM-DD).
    pub payment_deadline: Option<String>,
    /// Payment date (YYYY-MM-DD).
    pub payment_date: Option<String>,
    /// Display total.
    pub total: String,
    /// Whether this billing spawns a successor when paid.
    pub is_recurring: bool,
    /// Recurring interval wire value.
    pub recurring_interval: Option<String>,
}

impl BillingResponse {
    fn from_billing(billing: &Billing) -> Self {
        Self {
            id: billing.id,
            invoice_number: billing.invoice_number.clone(),
            client_name: billing.client.name.clone(),
            status: billing.status.as_str(),
            issue_date: billing.issue_date.map(|d| d.to_string()),
            payment_deadline: billing.payment_deadline.map(|d| d.to_string()),
            payment_date: billing.payment_date.map(|d| d.to_string()),
            total: billing.total_amount().to_string(),
            is_recurring: billing.is_recurring,
            recurring_interval: billing.recurring_interval.map(|i| i.to_string()),
        }
    }
}

/// Response for a status update: the primary result plus the side-effect
/// outcome, so callers can observe whether the successor draft was created.
#[derive(Debug, Serialize)]
pub struct SetStatusResponse {
    /// The updated billing.
    pub billing: BillingResponse,
    /// The successor draft, when one was created.
    pub successor: Option<BillingResponse>,
    /// Error code when a successor was planned but its insert failed.
    pub successor_error: Option<&'static str>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/accounts/{account_id}/billings` - List the account's billings.
async fn list_billings(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
    Query(query): Query<ListBillingsQuery>,
) -> Response {
    let filter = match build_filter(&query) {
        Ok(filter) => filter,
        Err(response) => return response,
    };

    match state.billings.list(account_id, filter).await {
        Ok(billings) => {
            let items: Vec<BillingResponse> =
                billings.iter().map(BillingResponse::from_billing).collect();
            (StatusCode::OK, Json(json!({ "billings": items }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list billings");
            storage_error_response()
        }
    }
}

/// PUT `/accounts/{account_id}/billings/{billing_id}/status` - Update a
/// billing's status, firing the side effects of the transition.
async fn set_status(
    State(state): State<AppState>,
    Path((account_id, billing_id)): Path<(AccountId, BillingId)>,
    Json(request): Json<SetStatusRequest>,
) -> Response {
    // Primary flow: fetch, plan, persist. Failures here fail the request.
    let billing = match state.billings.find_by_id(account_id, billing_id).await {
        Ok(Some(billing)) => billing,
        Ok(None) => return billing_error_response(&BillingError::NotFound(billing_id)),
        Err(e) => {
            error!(error = %e, %billing_id, "Failed to load billing");
            return storage_error_response();
        }
    };

    let change = match LifecycleService::plan_status_change(
        &billing,
        request.status,
        request.payment_date,
        Utc::now(),
    ) {
        Ok(change) => change,
        Err(e) => return billing_error_response(&e),
    };

    let updated = match state
        .billings
        .update_status(account_id, billing_id, change.patch)
        .await
    {
        Ok(updated) => updated,
        Err(RepositoryError::NotFound(id)) => {
            return billing_error_response(&BillingError::NotFound(id));
        }
        Err(e) => {
            error!(error = %e, %billing_id, "Failed to persist status update");
            return storage_error_response();
        }
    };

    // Side effects: best-effort, never fail the committed status update.
    if change.notify_sent {
        if let Err(e) = state.notifier.notify_sent(billing_id).await {
            warn!(error = %e, %billing_id, "Sent notification failed");
        }
    }

    let mut successor = None;
    let mut successor_error = None;
    if let Some(draft) = change.successor {
        match state.billings.insert(account_id, draft).await {
            Ok(created) => successor = Some(BillingResponse::from_billing(&created)),
            Err(e) => {
                // Non-atomic by design: the paid transition stays committed.
                error!(error = %e, %billing_id, "Recurring successor insert failed");
                successor_error = Some("SUCCESSOR_INSERT_FAILED");
            }
        }
    }

    (
        StatusCode::OK,
        Json(SetStatusResponse {
            billing: BillingResponse::from_billing(&updated),
            successor,
            successor_error,
        }),
    )
        .into_response()
}

// ============================================================================
// Helpers
// ============================================================================

fn build_filter(query: &ListBillingsQuery) -> Result<BillingFilter, Response> {
    let mut filter = BillingFilter::default();
    if let Some(value) = query.status.as_deref() {
        filter.status = Some(parse_status(value)?);
    }
    if let Some(value) = query.exclude_status.as_deref() {
        filter.exclude_status = Some(parse_status(value)?);
    }
    Ok(filter)
}

pub(crate) fn parse_status(value: &str) -> Result<BillingStatus, Response> {
    BillingStatus::parse(value).ok_or_else(|| {
        app_error_response(&AppError::Validation(format!(
            "Unknown billing status: {value}"
        )))
    })
}

pub(crate) fn billing_error_response(err: &BillingError) -> Response {
    error_body(err.status_code(), err.error_code(), &err.to_string())
}

pub(crate) fn app_error_response(err: &AppError) -> Response {
    error_body(err.status_code(), err.error_code(), &err.to_string())
}

pub(crate) fn storage_error_response() -> Response {
    app_error_response(&AppError::Database("An error occurred".to_string()))
}

fn error_body(status: u16, code: &str, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": code,
            "message": message
        })),
    )
        .into_response()
}
