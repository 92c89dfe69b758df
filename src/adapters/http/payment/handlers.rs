//! HTTP handlers for the payment endpoints.

use axum::extract::{Path, State};
use axum::Json;

use crate::adapters::http::{ApiError, AppState};

use super::dto::{CreateIntentRequest, CreateIntentResponse, PaymentStatusResponse};

/// POST /api/payment/create-intent - Create a payment intent.
///
/// Amounts below the processor minimum are rejected with 400 before any
/// processor contact. When no processor secret is configured the endpoint
/// answers 503 instead of crashing at startup.
pub async fn create_intent(
    State(state): State<AppState>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    let provider = state.payments.as_ref().ok_or(ApiError::PaymentsDisabled)?;

    let intent = provider
        .create_payment_intent(request.to_port_request())
        .await?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
        payment_intent_id: intent.intent_id,
    }))
}

/// GET /api/payment/status/:payment_intent_id - Retrieve intent status.
pub async fn get_payment_status(
    State(state): State<AppState>,
    Path(payment_intent_id): Path<String>,
) -> Result<Json<PaymentStatusResponse>, ApiError> {
    let provider = state.payments.as_ref().ok_or(ApiError::PaymentsDisabled)?;

    let status = provider.get_payment_intent(&payment_intent_id).await?;

    Ok(Json(PaymentStatusResponse::from(status)))
}
