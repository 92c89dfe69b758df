//! Stripe PaymentIntents adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::ports::{
    CreatePaymentIntentRequest, PaymentError, PaymentIntent, PaymentIntentStatus, PaymentProvider,
};

/// Every intent is created in the practice's settlement currency.
const CURRENCY: &str = "usd";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    secret_key: SecretString,

    /// Base URL for the Stripe API (default: https://api.stripe.com).
    api_base_url: String,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            secret_key,
            api_base_url: "https://api.stripe.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Stripe payment provider adapter.
///
/// Implements `PaymentProvider` via the PaymentIntents API: one form-encoded
/// call per operation, amount in integer minor units, automatic payment
/// method selection, and the patient identifiers attached as metadata the
/// processor never interprets.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

/// Subset of Stripe's PaymentIntent object we consume.
#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: Option<String>,
    status: String,
    amount: i64,
    currency: String,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeApiError,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    #[serde(rename = "type")]
    error_type: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Translate a non-success Stripe response into a `PaymentError`,
    /// carrying the processor's classification code when the body parses.
    fn error_from_response(status: u16, body: &str) -> PaymentError {
        match serde_json::from_str::<StripeErrorEnvelope>(body) {
            Ok(envelope) => {
                let message = envelope
                    .error
                    .message
                    .unwrap_or_else(|| format!("Stripe API error (status {})", status));
                let classification = envelope.error.code.or(envelope.error.error_type);

                let mut error = PaymentError::provider(message).with_http_status(status);
                if let Some(code) = classification {
                    error = error.with_provider_code(code);
                }
                error
            }
            Err(_) => PaymentError::provider(format!("Stripe API error: {}", body))
                .with_http_status(status),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        // Fail fast on bad input; no round trip is spent on it.
        request.validate()?;

        let url = format!("{}/v1/payment_intents", self.config.api_base_url);

        let mut params = vec![
            ("amount", request.amount_minor_units.to_string()),
            ("currency", CURRENCY.to_string()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
            ("metadata[patient_id]", request.patient_id.clone()),
        ];

        if let Some(name) = &request.patient_name {
            params.push(("metadata[patient_name]", name.clone()));
        }

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(status, error = %error_text, "Stripe create_payment_intent failed");
            return Err(Self::error_from_response(status, &error_text));
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        let client_secret = intent.client_secret.ok_or_else(|| {
            PaymentError::provider("Stripe response is missing client_secret")
        })?;

        tracing::info!(intent_id = %intent.id, amount = request.amount_minor_units, "payment intent created");

        Ok(PaymentIntent {
            intent_id: intent.id,
            client_secret,
        })
    }

    async fn get_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<PaymentIntentStatus, PaymentError> {
        if intent_id.trim().is_empty() {
            return Err(PaymentError::invalid_argument("intent_id must not be empty"));
        }

        let url = format!(
            "{}/v1/payment_intents/{}",
            self.config.api_base_url, intent_id
        );

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status, intent_id, "Stripe get_payment_intent failed");
            return Err(Self::error_from_response(status, &error_text));
        }

        let intent: StripePaymentIntent = response.json().await.map_err(|e| {
            PaymentError::provider(format!("Failed to parse Stripe response: {}", e))
        })?;

        Ok(PaymentIntentStatus {
            intent_id: intent.id,
            status: intent.status,
            amount: intent.amount,
            currency: intent.currency,
            metadata: intent.metadata,
        })
    }
}
