//! Axum router configuration for the coverage endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{get_coverage, lookup_coverages_by_payer};

/// Create the coverage API router.
///
/// Both routes require an `Authorization: Bearer` header from the caller;
/// requests without one are rejected before any upstream call.
///
/// # Routes
/// - `GET  /api/coverages/:id` - Proxy a single coverage lookup
/// - `POST /api/coverages` - Proxy a payer-wide coverage lookup
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/coverages/:id", get(get_coverage))
        .route("/api/coverages", post(lookup_coverages_by_payer))
}
