//! HTTP credential issuer - the client-credentials grant exchange.

use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::EligibilityConfig;
use crate::domain::{AccessCredential, BrokerError, UpstreamBody, EXPIRY_SAFETY_MARGIN_SECS};
use crate::ports::CredentialIssuer;

use super::response::read_response;

/// Token-endpoint response shape we rely on. Everything else in the body
/// (`token_type`, vendor extensions) is ignored.
#[derive(Debug, Deserialize)]
struct TokenGrant {
    access_token: String,

    /// Declared TTL in seconds. Absent is treated as zero downstream.
    #[serde(default)]
    expires_in: Option<i64>,
}

/// [`CredentialIssuer`] implementation performing the form-encoded
/// client-credentials grant against the configured token endpoint.
///
/// One network exchange per call, no caching, no retries. A non-success
/// response or a success body without `access_token` is surfaced as
/// [`BrokerError::Upstream`] with the original status and body.
pub struct HttpCredentialIssuer {
    config: EligibilityConfig,
    http_client: reqwest::Client,
}

impl HttpCredentialIssuer {
    /// Create a new issuer for the given eligibility configuration.
    pub fn new(config: EligibilityConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn parse_grant(body: &UpstreamBody) -> Option<TokenGrant> {
        match body {
            UpstreamBody::Json(value) => serde_json::from_value(value.clone()).ok(),
            UpstreamBody::Text(_) => None,
        }
    }
}

#[async_trait]
impl CredentialIssuer for HttpCredentialIssuer {
    async fn issue(&self) -> Result<AccessCredential, BrokerError> {
        tracing::debug!(endpoint = %self.config.token_url, "requesting fresh access credential");

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret().as_str()),
            ("scope", self.config.scope.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, endpoint = %self.config.token_url, "token endpoint unreachable");
                BrokerError::transport(e.to_string())
            })?;

        let upstream = read_response(response).await?;
        let issued_at = Utc::now();

        if !upstream.is_success() {
            tracing::warn!(
                status = upstream.status,
                body = %upstream.body.to_text(),
                "token endpoint rejected the grant"
            );
            return Err(BrokerError::upstream(upstream.status, upstream.body));
        }

        let grant = match Self::parse_grant(&upstream.body) {
            Some(grant) => grant,
            None => {
                tracing::warn!(
                    status = upstream.status,
                    "token endpoint returned a body without an access token"
                );
                return Err(BrokerError::upstream(upstream.status, upstream.body));
            }
        };

        if grant.expires_in.map_or(true, |ttl| ttl <= EXPIRY_SAFETY_MARGIN_SECS) {
            // Accepted as-is; the credential is born expired and the next use
            // forces a refresh.
            tracing::debug!(expires_in = ?grant.expires_in, "grant TTL within the safety margin");
        }

        Ok(AccessCredential::issued(
            grant.access_token,
            grant.expires_in,
            issued_at,
        ))
    }
}
