//! Payment provider port for external payment processing.
//!
//! Defines the contract for the payment gateway integration (e.g., Stripe).
//! The gateway is independent of the credential cache: it authenticates with
//! its own static secret and is stateless per call.
//!
//! # Design
//!
//! - **Gateway agnostic**: the interface works with any processor that can
//!   create a payment intent and report its status
//! - **Fail fast**: caller input is validated before any network call
//! - **Verbatim**: processor statuses and classification codes pass through
//!   without reinterpretation

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Smallest amount the processor accepts, in minor units (cents).
pub const MINIMUM_AMOUNT_MINOR_UNITS: i64 = 50;

/// Port for payment processor integrations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for a patient charge.
    ///
    /// Implementations must reject invalid requests (see
    /// [`CreatePaymentIntentRequest::validate`]) before contacting the
    /// processor.
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;

    /// Retrieve the current status of a payment intent.
    async fn get_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<PaymentIntentStatus, PaymentError>;
}

/// Request to create a payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Charge amount in minor units (cents). Must be at least
    /// [`MINIMUM_AMOUNT_MINOR_UNITS`].
    pub amount_minor_units: i64,

    /// Practice-side patient identifier, attached as opaque metadata.
    pub patient_id: String,

    /// Patient display name, attached as opaque metadata when present.
    pub patient_name: Option<String>,
}

impl CreatePaymentIntentRequest {
    /// Validate the request before any network call is made.
    ///
    /// Kept separate from transport so tests can exercise validation without
    /// a network double.
    pub fn validate(&self) -> Result<(), PaymentError> {
        if self.amount_minor_units < MINIMUM_AMOUNT_MINOR_UNITS {
            return Err(PaymentError::invalid_argument(format!(
                "amount must be at least {} minor units, got {}",
                MINIMUM_AMOUNT_MINOR_UNITS, self.amount_minor_units
            )));
        }
        if self.patient_id.trim().is_empty() {
            return Err(PaymentError::invalid_argument("patient_id must not be empty"));
        }
        Ok(())
    }
}

/// A freshly created payment intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Processor's intent identifier.
    pub intent_id: String,

    /// Client secret the browser uses to confirm the payment.
    pub client_secret: String,
}

/// Read-only view of a payment intent's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentStatus {
    /// Processor's intent identifier.
    pub intent_id: String,

    /// Processor status enum, surfaced verbatim.
    pub status: String,

    /// Amount in minor units.
    pub amount: i64,

    /// ISO currency code.
    pub currency: String,

    /// Opaque metadata attached at creation.
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Processor's classification code (e.g. Stripe `error.code`), if any.
    pub provider_code: Option<String>,

    /// Originating HTTP status from the processor, when one exists.
    pub http_status: Option<u16>,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            http_status: None,
        }
    }

    /// Attach the processor's classification code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Attach the originating HTTP status.
    pub fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Invalid caller input, detected before any network call.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidArgument, message)
    }

    /// Network-level failure reaching the processor.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Failure signaled by the processor itself.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderError, message)
    }

    /// Whether the caller may reasonably retry. The broker itself never
    /// retries; the retry decision belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Caller input rejected before contacting the processor.
    InvalidArgument,

    /// Network connectivity issue.
    NetworkError,

    /// Processor rejected or failed the operation.
    ProviderError,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentErrorCode::NetworkError)
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::InvalidArgument => "invalid_argument",
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}
