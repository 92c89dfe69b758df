//! HTTP DTOs for the token endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::AccessCredential;

/// Response for a token request, mirroring the upstream grant shape.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// The opaque bearer token.
    pub access_token: String,

    /// Always `bearer`.
    pub token_type: String,

    /// Whole seconds of validity remaining, clamped at zero.
    pub expires_in: i64,
}

impl TokenResponse {
    /// Build a response from the cached credential relative to `now`.
    pub fn from_credential(credential: &AccessCredential, now: DateTime<Utc>) -> Self {
        Self {
            access_token: credential.token().to_string(),
            token_type: "bearer".to_string(),
            expires_in: credential.remaining_secs(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn response_reflects_remaining_validity() {
        let now = Utc::now();
        let credential = AccessCredential::new("T1", now + Duration::seconds(3540));

        let response = TokenResponse::from_credential(&credential, now);

        assert_eq!(response.access_token, "T1");
        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, 3540);
    }

    #[test]
    fn expired_credential_reports_zero() {
        let now = Utc::now();
        let credential = AccessCredential::new("T1", now - Duration::seconds(5));

        let response = TokenResponse::from_credential(&credential, now);
        assert_eq!(response.expires_in, 0);
    }

    #[test]
    fn response_serializes_grant_shape() {
        let now = Utc::now();
        let credential = AccessCredential::new("T1", now + Duration::seconds(60));

        let json = serde_json::to_string(&TokenResponse::from_credential(&credential, now)).unwrap();

        assert!(json.contains(r#""access_token":"T1""#));
        assert!(json.contains(r#""token_type":"bearer""#));
    }
}
