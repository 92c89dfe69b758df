//! VerificationBroker - the single entry point for mediated requests.
//!
//! Every downstream caller (the token, coverage, and verification endpoints)
//! goes through this façade. It resolves a valid credential from the cache or
//! the issuer, validates caller input before any network round trip, and
//! forwards coverage lookups to the eligibility API.
//!
//! Credential lifecycle: {NoCredential, Valid, Expired}. An absent or expired
//! slot transitions to Valid through exactly one successful issuance path
//! ([`VerificationBroker::get_valid_credential`]); Valid transitions to
//! Expired purely by clock passage. A downstream 401 does not evict the
//! cached credential.
//!
//! There is no guard around the check-then-issue sequence: concurrent callers
//! observing an expired slot may each issue and overwrite the slot. Redundant
//! issuance is safe for callers, so this is tolerated rather than prevented.

use std::sync::Arc;

use crate::domain::{AccessCredential, BrokerError, UpstreamBody};
use crate::ports::{CoverageClient, CredentialIssuer, CredentialStore};

/// Façade coordinating the credential cache, the issuer, and the coverage
/// client.
pub struct VerificationBroker {
    store: Arc<dyn CredentialStore>,
    issuer: Arc<dyn CredentialIssuer>,
    coverage: Arc<dyn CoverageClient>,
}

impl VerificationBroker {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        issuer: Arc<dyn CredentialIssuer>,
        coverage: Arc<dyn CoverageClient>,
    ) -> Self {
        Self {
            store,
            issuer,
            coverage,
        }
    }

    /// Return a valid credential, issuing and caching a fresh one when the
    /// slot is absent or expired.
    ///
    /// This is the only path that produces a fresh credential; callers never
    /// reach the issuer directly.
    pub async fn get_valid_credential(&self) -> Result<AccessCredential, BrokerError> {
        if let Some(credential) = self.store.get() {
            tracing::debug!("reusing cached access credential");
            return Ok(credential);
        }

        let fresh = self.issuer.issue().await?;
        self.store.store(fresh.clone());
        tracing::info!(expires_at = %fresh.expires_at(), "issued and cached fresh access credential");

        Ok(fresh)
    }

    /// Look up a single coverage with the caller-supplied bearer token.
    ///
    /// Input is validated before any request is constructed: a missing bearer
    /// fails with `Unauthenticated` and an empty id with `InvalidArgument`,
    /// each without a wasted round trip.
    pub async fn coverage_by_id(
        &self,
        coverage_id: &str,
        bearer: &str,
    ) -> Result<UpstreamBody, BrokerError> {
        ensure_bearer(bearer)?;
        ensure_present("coverage_id", coverage_id)?;

        self.coverage.fetch_by_id(coverage_id, bearer).await
    }

    /// Look up the coverages of one payer with the caller-supplied bearer
    /// token.
    pub async fn coverages_by_payer(
        &self,
        payer_id: &str,
        bearer: &str,
    ) -> Result<UpstreamBody, BrokerError> {
        ensure_bearer(bearer)?;
        ensure_present("payer_id", payer_id)?;

        self.coverage.fetch_by_payer(payer_id, bearer).await
    }

    /// Composite: resolve a credential, then look up the coverage.
    ///
    /// Pure composition with no extra state; a credential failure aborts
    /// before the coverage call is attempted.
    pub async fn start_verification(
        &self,
        coverage_id: &str,
    ) -> Result<UpstreamBody, BrokerError> {
        let credential = self.get_valid_credential().await?;
        self.coverage_by_id(coverage_id, credential.token()).await
    }

    /// Composite: resolve a credential, then look up a payer's coverages.
    pub async fn start_verification_by_payer(
        &self,
        payer_id: &str,
    ) -> Result<UpstreamBody, BrokerError> {
        let credential = self.get_valid_credential().await?;
        self.coverages_by_payer(payer_id, credential.token()).await
    }
}

/// Pre-condition: the caller attached a non-empty bearer credential.
fn ensure_bearer(token: &str) -> Result<(), BrokerError> {
    if token.trim().is_empty() {
        return Err(BrokerError::unauthenticated());
    }
    Ok(())
}

/// Pre-condition: a required identifier is present.
fn ensure_present(field: &'static str, value: &str) -> Result<(), BrokerError> {
    if value.trim().is_empty() {
        return Err(BrokerError::invalid_argument(field, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::adapters::store::InMemoryCredentialStore;

    // ════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════

    /// Issuer that mints sequential tokens with a configurable TTL.
    struct MockIssuer {
        issued: AtomicUsize,
        expires_in: Option<i64>,
    }

    impl MockIssuer {
        fn with_ttl(expires_in: Option<i64>) -> Self {
            Self {
                issued: AtomicUsize::new(0),
                expires_in,
            }
        }

        fn issuance_count(&self) -> usize {
            self.issued.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CredentialIssuer for MockIssuer {
        async fn issue(&self) -> Result<AccessCredential, BrokerError> {
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AccessCredential::issued(
                format!("token-{n}"),
                self.expires_in,
                chrono::Utc::now(),
            ))
        }
    }

    /// Issuer whose upstream always rejects the grant.
    struct RejectingIssuer;

    #[async_trait]
    impl CredentialIssuer for RejectingIssuer {
        async fn issue(&self) -> Result<AccessCredential, BrokerError> {
            Err(BrokerError::upstream(
                401,
                UpstreamBody::Json(json!({"error": "invalid_client"})),
            ))
        }
    }

    /// Coverage client that records calls and the bearer it was handed.
    struct MockCoverage {
        calls: AtomicUsize,
        last_bearer: Mutex<Option<String>>,
        response: Result<UpstreamBody, BrokerError>,
    }

    impl MockCoverage {
        fn returning(response: Result<UpstreamBody, BrokerError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                last_bearer: Mutex::new(None),
                response,
            }
        }

        fn ok() -> Self {
            Self::returning(Ok(UpstreamBody::Json(json!({"coverageId": "cov_1"}))))
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_bearer(&self) -> Option<String> {
            self.last_bearer.lock().unwrap().clone()
        }

        fn record(&self, bearer: &str) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_bearer.lock().unwrap() = Some(bearer.to_string());
        }
    }

    #[async_trait]
    impl CoverageClient for MockCoverage {
        async fn fetch_by_id(
            &self,
            _coverage_id: &str,
            bearer: &str,
        ) -> Result<UpstreamBody, BrokerError> {
            self.record(bearer);
            self.response.clone()
        }

        async fn fetch_by_payer(
            &self,
            _payer_id: &str,
            bearer: &str,
        ) -> Result<UpstreamBody, BrokerError> {
            self.record(bearer);
            self.response.clone()
        }
    }

    fn broker_with(
        issuer: Arc<dyn CredentialIssuer>,
        coverage: Arc<MockCoverage>,
    ) -> VerificationBroker {
        VerificationBroker::new(
            Arc::new(InMemoryCredentialStore::new()),
            issuer,
            coverage,
        )
    }

    // ════════════════════════════════════════════════════════════════════════
    // Credential Lifecycle Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn calls_within_ttl_share_one_issuance() {
        let issuer = Arc::new(MockIssuer::with_ttl(Some(3600)));
        let broker = broker_with(issuer.clone(), Arc::new(MockCoverage::ok()));

        let first = broker.get_valid_credential().await.unwrap();
        let second = broker.get_valid_credential().await.unwrap();
        let third = broker.get_valid_credential().await.unwrap();

        assert_eq!(issuer.issuance_count(), 1);
        assert_eq!(first.token(), "token-1");
        assert_eq!(second.token(), "token-1");
        assert_eq!(third.token(), "token-1");
    }

    #[tokio::test]
    async fn expired_slot_triggers_exactly_one_new_issuance() {
        let issuer = Arc::new(MockIssuer::with_ttl(Some(3600)));
        let store = Arc::new(InMemoryCredentialStore::new());
        let broker = VerificationBroker::new(
            store.clone(),
            issuer.clone(),
            Arc::new(MockCoverage::ok()),
        );

        // Seed the slot with a credential that has already expired.
        store.store(AccessCredential::new(
            "stale",
            chrono::Utc::now() - chrono::Duration::seconds(1),
        ));

        let fresh = broker.get_valid_credential().await.unwrap();

        assert_eq!(issuer.issuance_count(), 1);
        assert_eq!(fresh.token(), "token-1");
        assert_ne!(fresh.token(), "stale");
    }

    #[tokio::test]
    async fn degenerate_ttl_forces_issuance_on_every_call() {
        // expires_in of 30 is within the safety margin: each credential is
        // born expired, so the next call issues again. Defined behavior, not
        // a bug.
        let issuer = Arc::new(MockIssuer::with_ttl(Some(30)));
        let broker = broker_with(issuer.clone(), Arc::new(MockCoverage::ok()));

        let first = broker.get_valid_credential().await.unwrap();
        let second = broker.get_valid_credential().await.unwrap();

        assert_eq!(issuer.issuance_count(), 2);
        assert_ne!(first.token(), second.token());
    }

    #[tokio::test]
    async fn absent_expires_in_behaves_like_degenerate_ttl() {
        let issuer = Arc::new(MockIssuer::with_ttl(None));
        let broker = broker_with(issuer.clone(), Arc::new(MockCoverage::ok()));

        broker.get_valid_credential().await.unwrap();
        broker.get_valid_credential().await.unwrap();

        assert_eq!(issuer.issuance_count(), 2);
    }

    #[tokio::test]
    async fn issuance_failure_surfaces_upstream_error_verbatim() {
        let broker = broker_with(Arc::new(RejectingIssuer), Arc::new(MockCoverage::ok()));

        let err = broker.get_valid_credential().await.unwrap_err();

        assert_eq!(err.upstream_status(), Some(401));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Coverage Validation Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn empty_coverage_id_fails_without_network() {
        let coverage = Arc::new(MockCoverage::ok());
        let broker = broker_with(Arc::new(MockIssuer::with_ttl(Some(3600))), coverage.clone());

        let err = broker.coverage_by_id("", "bearer-token").await.unwrap_err();

        assert!(matches!(err, BrokerError::InvalidArgument { ref field, .. } if field == "coverage_id"));
        assert_eq!(coverage.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_bearer_fails_without_network() {
        let coverage = Arc::new(MockCoverage::ok());
        let broker = broker_with(Arc::new(MockIssuer::with_ttl(Some(3600))), coverage.clone());

        let err = broker.coverage_by_id("cov_1", "").await.unwrap_err();

        assert_eq!(err, BrokerError::Unauthenticated);
        assert_eq!(coverage.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_payer_id_fails_without_network() {
        let coverage = Arc::new(MockCoverage::ok());
        let broker = broker_with(Arc::new(MockIssuer::with_ttl(Some(3600))), coverage.clone());

        let err = broker.coverages_by_payer("  ", "bearer-token").await.unwrap_err();

        assert!(matches!(err, BrokerError::InvalidArgument { ref field, .. } if field == "payer_id"));
        assert_eq!(coverage.call_count(), 0);
    }

    #[tokio::test]
    async fn coverage_error_passes_through_unchanged() {
        let failure = BrokerError::upstream(500, UpstreamBody::Text("<html>boom</html>".into()));
        let coverage = Arc::new(MockCoverage::returning(Err(failure.clone())));
        let broker = broker_with(Arc::new(MockIssuer::with_ttl(Some(3600))), coverage);

        let err = broker.coverage_by_id("cov_1", "bearer-token").await.unwrap_err();

        assert_eq!(err, failure);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Composite Operation Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn start_verification_attaches_the_resolved_credential() {
        let coverage = Arc::new(MockCoverage::ok());
        let broker = broker_with(Arc::new(MockIssuer::with_ttl(Some(3600))), coverage.clone());

        let body = broker.start_verification("cov_1").await.unwrap();

        assert!(matches!(body, UpstreamBody::Json(_)));
        assert_eq!(coverage.last_bearer().as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn start_verification_reuses_the_cached_credential() {
        let issuer = Arc::new(MockIssuer::with_ttl(Some(3600)));
        let coverage = Arc::new(MockCoverage::ok());
        let broker = broker_with(issuer.clone(), coverage.clone());

        broker.start_verification("cov_1").await.unwrap();
        broker.start_verification_by_payer("payer_9").await.unwrap();

        assert_eq!(issuer.issuance_count(), 1);
        assert_eq!(coverage.call_count(), 2);
    }

    #[tokio::test]
    async fn start_verification_aborts_before_coverage_on_credential_failure() {
        let coverage = Arc::new(MockCoverage::ok());
        let broker = broker_with(Arc::new(RejectingIssuer), coverage.clone());

        let err = broker.start_verification("cov_1").await.unwrap_err();

        assert_eq!(err.upstream_status(), Some(401));
        assert_eq!(coverage.call_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Pre-condition Helper Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn ensure_bearer_rejects_blank_tokens() {
        assert!(ensure_bearer("").is_err());
        assert!(ensure_bearer("   ").is_err());
        assert!(ensure_bearer("tok").is_ok());
    }

    #[test]
    fn ensure_present_names_the_field() {
        let err = ensure_present("payer_id", "").unwrap_err();
        assert!(matches!(err, BrokerError::InvalidArgument { ref field, .. } if field == "payer_id"));
    }
}
