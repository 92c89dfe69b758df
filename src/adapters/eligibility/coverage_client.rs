//! HTTP coverage client - authenticated lookups against the eligibility API.

use async_trait::async_trait;

use crate::config::EligibilityConfig;
use crate::domain::{BrokerError, UpstreamBody};
use crate::ports::CoverageClient;

use super::response::read_response;

/// [`CoverageClient`] implementation over the eligibility API's coverage
/// endpoints.
///
/// Payloads pass through untouched in both directions; the client only
/// attaches the bearer credential and translates non-success responses into
/// [`BrokerError::Upstream`] with status and body preserved for manual
/// replay.
pub struct HttpCoverageClient {
    config: EligibilityConfig,
    http_client: reqwest::Client,
}

impl HttpCoverageClient {
    /// Create a new coverage client for the given eligibility configuration.
    pub fn new(config: EligibilityConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn coverage_url(&self, coverage_id: &str) -> String {
        format!("{}/coverages/{}", self.base_url(), coverage_id)
    }

    fn coverages_url(&self) -> String {
        format!("{}/coverages", self.base_url())
    }

    fn base_url(&self) -> &str {
        self.config.api_base_url.trim_end_matches('/')
    }

    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        method: &'static str,
        url: &str,
    ) -> Result<UpstreamBody, BrokerError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, %method, %url, "eligibility API unreachable");
            BrokerError::transport(e.to_string())
        })?;

        let upstream = read_response(response).await?;
        if !upstream.is_success() {
            // Method and URL in the log give enough to replay the request.
            tracing::warn!(
                status = upstream.status,
                %method,
                %url,
                "eligibility API returned an error response"
            );
        }

        upstream.into_result()
    }
}

#[async_trait]
impl CoverageClient for HttpCoverageClient {
    async fn fetch_by_id(
        &self,
        coverage_id: &str,
        bearer: &str,
    ) -> Result<UpstreamBody, BrokerError> {
        let url = self.coverage_url(coverage_id);
        let request = self.http_client.get(&url).bearer_auth(bearer);

        self.dispatch(request, "GET", &url).await
    }

    async fn fetch_by_payer(
        &self,
        payer_id: &str,
        bearer: &str,
    ) -> Result<UpstreamBody, BrokerError> {
        let url = self.coverages_url();
        let request = self
            .http_client
            .post(&url)
            .bearer_auth(bearer)
            .form(&[("payerId", payer_id)]);

        self.dispatch(request, "POST", &url).await
    }
}
