//! API error type and uniform error response shape.
//!
//! Local failures (bad input, missing authorization, disabled payments) use
//! the JSON `{error_code, message}` shape. Upstream failures are different by
//! design: the original status code and body pass through verbatim so the
//! dashboard can show - and an operator can replay - exactly what the
//! upstream said.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{BrokerError, UpstreamBody};
use crate::ports::{PaymentError, PaymentErrorCode};

/// Standard error response for locally detected failures.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,

    /// Human-readable error message.
    pub message: String,

    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// API error type that converts broker and payment failures to HTTP
/// responses.
#[derive(Debug)]
pub enum ApiError {
    /// Failure from the credential broker or coverage mediation.
    Broker(BrokerError),

    /// Failure from the payment provider.
    Payment(PaymentError),

    /// Payment endpoints are disabled because no processor secret is
    /// configured.
    PaymentsDisabled,
}

impl From<BrokerError> for ApiError {
    fn from(err: BrokerError) -> Self {
        Self::Broker(err)
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self::Payment(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Broker(BrokerError::InvalidArgument { field, reason }) => {
                let body = ErrorResponse::new(
                    "INVALID_ARGUMENT",
                    format!("Invalid value for '{}': {}", field, reason),
                );
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Broker(BrokerError::Unauthenticated) => {
                let body = ErrorResponse::new(
                    "AUTHENTICATION_REQUIRED",
                    "Authorization header with a bearer token is required",
                );
                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            }
            ApiError::Broker(BrokerError::Upstream { status, body }) => {
                upstream_passthrough(status, body)
            }
            ApiError::Broker(BrokerError::Transport { message }) => {
                let body = ErrorResponse::new("UPSTREAM_UNREACHABLE", message);
                (StatusCode::BAD_GATEWAY, Json(body)).into_response()
            }
            ApiError::Payment(error) => payment_response(error),
            ApiError::PaymentsDisabled => {
                let body = ErrorResponse::new(
                    "PAYMENTS_DISABLED",
                    "Payment processing is not configured on this server",
                );
                (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
            }
        }
    }
}

/// Relay an upstream failure with its original status code and body.
fn upstream_passthrough(status: u16, body: UpstreamBody) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);

    match body {
        UpstreamBody::Json(value) => (status, Json(value)).into_response(),
        UpstreamBody::Text(text) => (status, text).into_response(),
    }
}

fn payment_response(error: PaymentError) -> Response {
    let status = error
        .http_status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(match error.code {
            PaymentErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            PaymentErrorCode::NetworkError | PaymentErrorCode::ProviderError => {
                StatusCode::BAD_GATEWAY
            }
        });

    let error_code = match error.code {
        PaymentErrorCode::InvalidArgument => "INVALID_ARGUMENT",
        PaymentErrorCode::NetworkError => "PAYMENT_PROCESSOR_UNREACHABLE",
        PaymentErrorCode::ProviderError => "PAYMENT_PROCESSOR_ERROR",
    };

    let body = match &error.provider_code {
        Some(code) => ErrorResponse::with_details(
            error_code,
            error.message.clone(),
            serde_json::json!({"provider_code": code}),
        ),
        None => ErrorResponse::new(error_code, error.message.clone()),
    };

    (status, Json(body)).into_response()
}
