//! HTTP adapters - the REST surface exposed to the dashboard.
//!
//! Each resource keeps the same three-file split (`dto`, `handlers`,
//! `routes`); the shared [`ApiError`] translates broker and payment failures
//! into responses, passing upstream errors through with their original status
//! and body.

pub mod coverage;
pub mod error;
pub mod payment;
pub mod token;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};

use crate::application::VerificationBroker;
use crate::ports::PaymentProvider;

pub use error::{ApiError, ErrorResponse};

/// Shared application state containing all handler dependencies.
///
/// Cloned per request; both members are `Arc`-wrapped. The payment provider
/// is optional: when the processor secret is not configured the payment
/// endpoints answer 503 instead of the server refusing to start.
#[derive(Clone)]
pub struct AppState {
    pub broker: Arc<VerificationBroker>,
    pub payments: Option<Arc<dyn PaymentProvider>>,
}

/// Assemble the full API router.
///
/// # Routes
///
/// - `GET  /health` - liveness probe
/// - `POST /api/token` - issue or reuse the cached access credential
/// - `GET  /api/coverages/:id` - proxy a single coverage lookup
/// - `POST /api/coverages` - proxy a payer-wide coverage lookup
/// - `POST /api/payment/create-intent` - create a payment intent
/// - `GET  /api/payment/status/:payment_intent_id` - retrieve intent status
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(token::routes())
        .merge(coverage::routes())
        .merge(payment::routes())
}

/// GET /health - liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
