//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CreatePaymentIntentRequest, PaymentError, PaymentIntent, PaymentIntentStatus, PaymentProvider,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Inject errors
/// mock.set_error(PaymentError::provider("Test decline"));
///
/// // Use in tests
/// let result = mock.create_payment_intent(request).await;
/// assert_eq!(mock.call_count("create_payment_intent"), 1);
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Intents created so far, by ID.
    intents: HashMap<String, PaymentIntentStatus>,

    /// Next intent to return from `create_payment_intent`.
    next_intent: Option<PaymentIntent>,

    /// Error to return on the next call to any method.
    next_error: Option<PaymentError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, PaymentError>,

    /// Track method calls for assertions.
    call_log: Vec<MethodCall>,

    /// Monotonic counter for generated intent IDs.
    created: usize,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════

    /// Set the intent to return on the next `create_payment_intent` call.
    pub fn set_intent(&self, intent: PaymentIntent) {
        self.inner.lock().unwrap().next_intent = Some(intent);
    }

    /// Add an intent status to the "database".
    pub fn add_intent_status(&self, status: PaymentIntentStatus) {
        let id = status.intent_id.clone();
        self.inner.lock().unwrap().intents.insert(id, status);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: PaymentError) {
        self.inner
            .lock()
            .unwrap()
            .method_errors
            .insert(method.to_string(), error);
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.inner.lock().unwrap();
        state.next_error = None;
        state.method_errors.clear();
    }

    // ════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.inner.lock().unwrap().call_log.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .any(|c| c.method == method)
    }

    /// Get count of calls to a method.
    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.inner.lock().unwrap().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), PaymentError> {
        let mut state = self.inner.lock().unwrap();

        // Check method-specific error first
        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // Check global error (consumes it)
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentProvider {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_payment_intent(
        &self,
        request: CreatePaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        // Validation mirrors the live adapter and runs before the call is
        // recorded, so the call log reflects actual processor traffic.
        request.validate()?;

        self.record_call(
            "create_payment_intent",
            vec![
                request.amount_minor_units.to_string(),
                request.patient_id.clone(),
            ],
        );
        self.check_error("create_payment_intent")?;

        let mut state = self.inner.lock().unwrap();
        state.created += 1;
        let sequence = state.created;

        let intent = state.next_intent.take().unwrap_or_else(|| {
            let suffix = uuid::Uuid::new_v4()
                .simple()
                .to_string()
                .chars()
                .take(8)
                .collect::<String>();
            let id = format!("pi_mock_{sequence}_{suffix}");
            PaymentIntent {
                client_secret: format!("{id}_secret"),
                intent_id: id,
            }
        });

        // Store for later retrieval
        state.intents.insert(
            intent.intent_id.clone(),
            PaymentIntentStatus {
                intent_id: intent.intent_id.clone(),
                status: "requires_payment_method".to_string(),
                amount: request.amount_minor_units,
                currency: "usd".to_string(),
                metadata: {
                    let mut metadata = HashMap::new();
                    metadata.insert("patient_id".to_string(), request.patient_id);
                    if let Some(name) = request.patient_name {
                        metadata.insert("patient_name".to_string(), name);
                    }
                    metadata
                },
            },
        );

        Ok(intent)
    }

    async fn get_payment_intent(
        &self,
        intent_id: &str,
    ) -> Result<PaymentIntentStatus, PaymentError> {
        self.record_call("get_payment_intent", vec![intent_id.to_string()]);
        self.check_error("get_payment_intent")?;

        let state = self.inner.lock().unwrap();
        state.intents.get(intent_id).cloned().ok_or_else(|| {
            PaymentError::provider(format!("No such payment_intent: '{intent_id}'"))
                .with_provider_code("resource_missing")
                .with_http_status(404)
        })
    }
}
