//! HTTP DTOs for the payment endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ports::{CreatePaymentIntentRequest, PaymentIntentStatus};

/// Request to create a payment intent for a patient charge.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    /// Amount in minor units (cents). The dashboard may send a fractional
    /// value; it is rounded to the nearest integer before reaching the
    /// processor.
    pub amount: f64,

    /// Practice-side patient identifier.
    pub patient_id: String,

    /// Patient display name (optional).
    #[serde(default)]
    pub patient_name: Option<String>,
}

impl CreateIntentRequest {
    /// Convert to the port request, rounding the amount to integer minor
    /// units. Validation happens at the provider boundary.
    pub fn to_port_request(&self) -> CreatePaymentIntentRequest {
        CreatePaymentIntentRequest {
            amount_minor_units: self.amount.round() as i64,
            patient_id: self.patient_id.clone(),
            patient_name: self.patient_name.clone(),
        }
    }
}

/// Response for a created payment intent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    /// Client secret the dashboard uses to confirm the payment.
    pub client_secret: String,

    /// Processor's intent identifier.
    pub payment_intent_id: String,
}

/// Response for a payment status lookup.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentStatusResponse {
    /// Processor status, surfaced verbatim.
    pub status: String,

    /// Amount in minor units.
    pub amount: i64,

    /// ISO currency code.
    pub currency: String,

    /// Opaque metadata attached at creation.
    pub metadata: HashMap<String, String>,
}

impl From<PaymentIntentStatus> for PaymentStatusResponse {
    fn from(status: PaymentIntentStatus) -> Self {
        Self {
            status: status.status,
            amount: status.amount,
            currency: status.currency,
            metadata: status.metadata,
        }
    }
}
