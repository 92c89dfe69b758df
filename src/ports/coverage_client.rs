//! Coverage client port - authenticated eligibility lookups.

use async_trait::async_trait;

use crate::domain::{BrokerError, UpstreamBody};

/// Port for the coverage endpoints of the eligibility API.
///
/// Coverage payloads are opaque to this system: the dashboard renders
/// whatever the upstream returns, so responses pass through as
/// [`UpstreamBody`] without further interpretation. Implementations receive a
/// bearer token already validated as non-empty by the broker and must
/// translate any non-success response into [`BrokerError::Upstream`]
/// preserving status and body verbatim.
#[async_trait]
pub trait CoverageClient: Send + Sync {
    /// GET a single coverage by its identifier.
    async fn fetch_by_id(
        &self,
        coverage_id: &str,
        bearer: &str,
    ) -> Result<UpstreamBody, BrokerError>;

    /// POST a payer-wide coverage lookup (form-encoded `payerId`).
    async fn fetch_by_payer(
        &self,
        payer_id: &str,
        bearer: &str,
    ) -> Result<UpstreamBody, BrokerError>;
}
