//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment processor configuration (Stripe)
///
/// The whole section is optional at the `AppConfig` level: when the secret key
/// is not supplied the payment endpoints are disabled instead of the process
/// refusing to start.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...)
    pub stripe_secret_key: SecretString,
}

impl PaymentConfig {
    /// Check if using Stripe test mode
    pub fn is_test_mode(&self) -> bool {
        self.stripe_secret_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using Stripe live mode
    pub fn is_live_mode(&self) -> bool {
        self.stripe_secret_key.expose_secret().starts_with("sk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.stripe_secret_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
        }

        // Verify key prefix for safety
        if !self.stripe_secret_key.expose_secret().starts_with("sk_") {
            return Err(ValidationError::InvalidStripeKey);
        }

        Ok(())
    }
}
