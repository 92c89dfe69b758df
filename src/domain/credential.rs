//! Access credential value object.
//!
//! A credential is an opaque bearer token plus the absolute instant after
//! which it must not be presented upstream. Credentials are immutable values:
//! a refresh produces a new credential and reassigns the cache slot, it never
//! mutates in place.

use chrono::{DateTime, Duration, Utc};

/// Seconds subtracted from the upstream-declared TTL.
///
/// The margin guarantees the broker never presents a token the upstream may
/// already consider expired. A declared TTL at or below the margin yields a
/// credential that is born expired, which simply forces a refresh on next use.
pub const EXPIRY_SAFETY_MARGIN_SECS: i64 = 60;

/// A short-lived bearer credential for the eligibility API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCredential {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AccessCredential {
    /// Create a credential with an explicit expiry instant.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Create a credential from a token-endpoint grant.
    ///
    /// `expires_in` is the upstream-declared TTL in seconds; the safety margin
    /// is subtracted unconditionally. An absent TTL is treated as zero, so the
    /// resulting credential is already expired. That degenerate case is
    /// accepted as-is rather than floored.
    pub fn issued(
        token: impl Into<String>,
        expires_in: Option<i64>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let ttl = expires_in.unwrap_or(0) - EXPIRY_SAFETY_MARGIN_SECS;
        Self {
            token: token.into(),
            expires_at: issued_at + Duration::seconds(ttl),
        }
    }

    /// The opaque bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The instant after which the credential must not be presented.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A credential is valid strictly before its expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Convenience check against the current wall clock.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Whole seconds of validity left, clamped at zero.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap()
    }

    #[test]
    fn grant_of_3600_is_valid_for_exactly_3540_seconds() {
        let credential = AccessCredential::issued("T1", Some(3600), t0());

        assert_eq!(credential.expires_at(), t0() + Duration::seconds(3540));
        assert!(credential.is_valid_at(t0()));
        assert!(credential.is_valid_at(t0() + Duration::seconds(3539)));
        assert!(!credential.is_valid_at(t0() + Duration::seconds(3540)));
        assert!(!credential.is_valid_at(t0() + Duration::seconds(3541)));
    }

    #[test]
    fn grant_at_the_margin_is_born_expired() {
        let credential = AccessCredential::issued("T1", Some(30), t0());

        assert!(credential.expires_at() < t0());
        assert!(!credential.is_valid_at(t0()));
    }

    #[test]
    fn grant_without_ttl_is_born_expired() {
        let credential = AccessCredential::issued("T1", None, t0());

        assert_eq!(credential.expires_at(), t0() - Duration::seconds(60));
        assert!(!credential.is_valid_at(t0()));
    }

    #[test]
    fn remaining_secs_clamps_at_zero() {
        let credential = AccessCredential::issued("T1", Some(3600), t0());

        assert_eq!(credential.remaining_secs(t0()), 3540);
        assert_eq!(
            credential.remaining_secs(t0() + Duration::seconds(3539)),
            1
        );
        assert_eq!(credential.remaining_secs(t0() + Duration::hours(2)), 0);
    }

    #[test]
    fn token_is_preserved_verbatim() {
        let credential = AccessCredential::issued("opaque.jwt-ish.value", Some(3600), t0());
        assert_eq!(credential.token(), "opaque.jwt-ish.value");
    }

    proptest! {
        #[test]
        fn any_grant_above_the_margin_is_valid_at_issuance(ttl in 61i64..86_400) {
            let credential = AccessCredential::issued("T1", Some(ttl), t0());

            prop_assert!(credential.is_valid_at(t0()));
            prop_assert_eq!(
                credential.expires_at(),
                t0() + Duration::seconds(ttl - EXPIRY_SAFETY_MARGIN_SECS)
            );
        }

        #[test]
        fn any_grant_at_or_below_the_margin_is_expired_at_issuance(ttl in 0i64..=60) {
            let credential = AccessCredential::issued("T1", Some(ttl), t0());

            prop_assert!(!credential.is_valid_at(t0()));
        }
    }
}
