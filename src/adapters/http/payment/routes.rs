//! Axum router configuration for the payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::adapters::http::AppState;

use super::handlers::{create_intent, get_payment_status};

/// Create the payment API router.
///
/// # Routes
/// - `POST /api/payment/create-intent` - Create a payment intent
/// - `GET  /api/payment/status/:payment_intent_id` - Retrieve intent status
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/payment/create-intent", post(create_intent))
        .route(
            "/api/payment/status/:payment_intent_id",
            get(get_payment_status),
        )
}
