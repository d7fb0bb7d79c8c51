//! Sales report routes.
//!
//! Report queries exclude `Planned` billings at the repository before the
//! aggregation runs; the engine itself never re-filters status. The default
//! window (trailing 12 months) is the only place the wall clock enters the
//! flow - the aggregation core receives explicit windows only.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::error;

use crate::AppState;
use crate::routes::billings::{app_error_response, storage_error_response};
use billora_core::billing::types::BillingStatus;
use billora_core::sales::{MonthlySales, SalesService, SalesWindow};
use billora_db::BillingFilter;
use billora_shared::AppError;
use billora_shared::types::{AccountId, BillingId};

/// Creates the sales report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/{account_id}/reports/monthly-sales",
            get(get_monthly_sales),
        )
        .route("/accounts/{account_id}/reports/clients", get(get_clients))
        .route(
            "/accounts/{account_id}/reports/invoices",
            get(get_month_invoices),
        )
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the monthly sales report.
#[derive(Debug, Deserialize)]
pub struct MonthlySalesQuery {
    /// First year of the window.
    pub start_year: Option<i32>,
    /// First month of the window (1-12).
    pub start_month: Option<u32>,
    /// Last year of the window.
    pub end_year: Option<i32>,
    /// Last month of the window (1-12).
    pub end_month: Option<u32>,
    /// Exact-match client display name filter.
    pub client: Option<String>,
}

/// Query parameters for the per-month invoice listing.
#[derive(Debug, Deserialize)]
pub struct MonthInvoicesQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Exact-match client display name filter.
    pub client: Option<String>,
}

// ============================================================================
// Response Types
// ============================================================================

/// One month bucket in the sales report.
#[derive(Debug, Serialize)]
pub struct MonthlySalesResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Display label, `YYYY/MM`.
    pub label: String,
    /// Total sales in the month.
    pub total_sales: String,
    /// Number of invoices counted.
    pub invoice_count: u32,
    /// Per-client sales within the month.
    pub sales_by_client: BTreeMap<String, String>,
}

impl MonthlySalesResponse {
    fn from_bucket(bucket: MonthlySales) -> Self {
        Self {
            year: bucket.year,
            month: bucket.month,
            label: bucket.label,
            total_sales: bucket.total_sales.to_string(),
            invoice_count: bucket.invoice_count,
            sales_by_client: bucket
                .sales_by_client
                .into_iter()
                .map(|(client, sales)| (client, sales.to_string()))
                .collect(),
        }
    }
}

/// One invoice row in the per-month listing.
#[derive(Debug, Serialize)]
pub struct InvoiceDetailResponse {
    /// Billing ID.
    pub id: BillingId,
    /// Display invoice number.
    pub invoice_number: String,
    /// Client display name.
    pub client_name: String,
    /// Issue date (YYYY-MM-DD).
    pub issue_date: Option<String>,
    /// Payment deadline (YYYY-MM-DD).
    pub payment_deadline: Option<String>,
    /// Display total.
    pub total: String,
    /// Lifecycle status.
    pub status: &'static str,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/accounts/{account_id}/reports/monthly-sales` - Month-bucketed sales.
async fn get_monthly_sales(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
    Query(query): Query<MonthlySalesQuery>,
) -> Response {
    let window = match resolve_window(&query) {
        Ok(window) => window,
        Err(response) => return response,
    };

    let filter = BillingFilter {
        exclude_status: Some(BillingStatus::Planned),
        ..BillingFilter::default()
    };
    match state.billings.list(account_id, filter).await {
        Ok(billings) => {
            let buckets =
                SalesService::aggregate_monthly_sales(&billings, &window, query.client.as_deref());
            let months: Vec<MonthlySalesResponse> = buckets
                .into_iter()
                .map(MonthlySalesResponse::from_bucket)
                .collect();
            (StatusCode::OK, Json(json!({ "months": months }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to load billings for sales report");
            storage_error_response()
        }
    }
}

/// GET `/accounts/{account_id}/reports/clients` - Distinct client names.
async fn get_clients(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
) -> Response {
    // All statuses and dates count here; the list feeds filter choices.
    match state
        .billings
        .list(account_id, BillingFilter::default())
        .await
    {
        Ok(billings) => {
            let clients = SalesService::client_names(&billings);
            (StatusCode::OK, Json(json!({ "clients": clients }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to load billings for client list");
            storage_error_response()
        }
    }
}

/// GET `/accounts/{account_id}/reports/invoices` - Invoices of one month.
async fn get_month_invoices(
    State(state): State<AppState>,
    Path(account_id): Path<AccountId>,
    Query(query): Query<MonthInvoicesQuery>,
) -> Response {
    if let Err(response) = validate_month(query.month) {
        return response;
    }

    let filter = BillingFilter {
        exclude_status: Some(BillingStatus::Planned),
        ..BillingFilter::default()
    };
    match state.billings.list(account_id, filter).await {
        Ok(billings) => {
            let details = SalesService::invoices_for_month(
                &billings,
                query.year,
                query.month,
                query.client.as_deref(),
            );
            let invoices: Vec<InvoiceDetailResponse> = details
                .into_iter()
                .map(|detail| InvoiceDetailResponse {
                    id: detail.id,
                    invoice_number: detail.invoice_number,
                    client_name: detail.client_name,
                    issue_date: detail.issue_date.map(|d| d.to_string()),
                    payment_deadline: detail.payment_deadline.map(|d| d.to_string()),
                    total: detail.total.to_string(),
                    status: detail.status.as_str(),
                })
                .collect();
            (StatusCode::OK, Json(json!({ "invoices": invoices }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to load billings for invoice listing");
            storage_error_response()
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn validate_month(month: u32) -> Result<(), Response> {
    if (1..=12).contains(&month) {
        return Ok(());
    }
    Err(app_error_response(&AppError::Validation(format!(
        "Month must be between 1 and 12, got {month}"
    ))))
}

/// Resolves the requested window, defaulting omitted bounds: the end bound
/// defaults to the current calendar month, the start bound to 11 months
/// before the end (a trailing year).
fn resolve_window(query: &MonthlySalesQuery) -> Result<SalesWindow, Response> {
    for month in [query.start_month, query.end_month].into_iter().flatten() {
        validate_month(month)?;
    }

    let today = Utc::now().date_naive();
    let (end_year, end_month) = match (query.end_year, query.end_month) {
        (Some(year), Some(month)) => (year, month),
        _ => {
            let window = SalesWindow::trailing_year(today);
            (window.end_year, window.end_month)
        }
    };

    let (start_year, start_month) = match (query.start_year, query.start_month) {
        (Some(year), Some(month)) => (year, month),
        _ => {
            let end_anchor = NaiveDate::from_ymd_opt(end_year, end_month, 1).unwrap_or(today);
            let window = SalesWindow::trailing_year(end_anchor);
            (window.start_year, window.start_month)
        }
    };

    Ok(SalesWindow::new(
        start_year,
        start_month,
        end_year,
        end_month,
    ))
}
