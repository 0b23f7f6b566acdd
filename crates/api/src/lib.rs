//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for accounts, transactions and reports
//! - Error-to-JSON mapping
//! - Request and response types

pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tally_core::ledger::TransactionPoster;
use tally_core::reports::ReportEngine;
use tally_core::store::LedgerStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Ledger store, for account management and lookups.
    pub store: Arc<dyn LedgerStore>,
    /// Transaction poster.
    pub poster: TransactionPoster<dyn LedgerStore>,
    /// Report engine.
    pub reports: ReportEngine<dyn LedgerStore>,
}

impl AppState {
    /// Wires every component to the same store.
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self {
            poster: TransactionPoster::new(Arc::clone(&store)),
            reports: ReportEngine::new(Arc::clone(&store)),
            store,
        }
    }
}

/// Creates the main application router.
///
/// Requests running longer than `request_timeout` are cancelled, which drops
/// any in-flight store call before it commits.
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
