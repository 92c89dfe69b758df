//! Axum router configuration for the token endpoint.

use axum::routing::post;
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::issue_token;

/// Create the token API router.
///
/// # Routes
/// - `POST /api/token` - Issue or return the cached access credential
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/token", post(issue_token))
}
