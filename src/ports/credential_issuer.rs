//! Credential issuer port - the out-of-band token exchange.

use async_trait::async_trait;

use crate::domain::{AccessCredential, BrokerError};

/// Port for exchanging static client credentials for a fresh access
/// credential.
///
/// Implementations perform a single network exchange (the form-encoded
/// client-credentials grant) per call. No caching happens here; the broker is
/// the only caller and owns the cache. Failures surface immediately: a
/// non-success response becomes [`BrokerError::Upstream`] with the original
/// status and body, and no retry is attempted.
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    /// Perform the grant exchange and return the freshly issued credential.
    async fn issue(&self) -> Result<AccessCredential, BrokerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_issuer_is_object_safe() {
        fn _accepts_dyn(_issuer: &dyn CredentialIssuer) {}
    }
}
