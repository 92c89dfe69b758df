//! Eligibility API configuration
//!
//! Static client-credentials material for the upstream eligibility API. The
//! client secret never leaves the server; the browser only ever sees the
//! short-lived access tokens minted from it.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Eligibility API configuration (token endpoint + coverage endpoints)
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityConfig {
    /// OAuth token endpoint for the client-credentials grant
    pub token_url: String,

    /// Base URL for the coverage endpoints (no trailing slash required)
    pub api_base_url: String,

    /// OAuth client identifier
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: SecretString,

    /// OAuth scope requested during the grant
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl EligibilityConfig {
    /// Validate eligibility configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token_url.is_empty() {
            return Err(ValidationError::MissingRequired("ELIGIBILITY_TOKEN_URL"));
        }
        if self.api_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("ELIGIBILITY_API_BASE_URL"));
        }
        if !is_http_url(&self.token_url) {
            return Err(ValidationError::InvalidUrl("token_url"));
        }
        if !is_http_url(&self.api_base_url) {
            return Err(ValidationError::InvalidUrl("api_base_url"));
        }
        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("ELIGIBILITY_CLIENT_ID"));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("ELIGIBILITY_CLIENT_SECRET"));
        }
        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn default_scope() -> String {
    "hipaa".to_string()
}
