//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Error-to-response mapping
//! - Shared application state
//!
//! Authentication/session handling lives outside this core; handlers are
//! scoped by the account id carried in the URL path, and the repository
//! enforces that no read or write crosses account boundaries.

pub mod routes;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use billora_db::BillingRepository;
use billora_shared::Notifier;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Billing storage, scoped by account on every call.
    pub billings: Arc<dyn BillingRepository>,
    /// Outbound notification collaborator (fire-and-forget).
    pub notifier: Arc<dyn Notifier>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
