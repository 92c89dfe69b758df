//! Broker error taxonomy.
//!
//! Every failure a mediated request can produce maps onto one of these
//! variants. Nothing is retried internally and nothing is downgraded to a
//! generic failure: upstream responses keep their original status code and
//! body verbatim so a failing request can be reproduced manually.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidArgument | 400 |
//! | Unauthenticated | 401 |
//! | Upstream | passthrough of the upstream status |
//! | Transport | 502 |

use thiserror::Error;

/// An upstream response body, interpreted once at the broker boundary.
///
/// The upstream declares `application/json` → parsed value; anything else
/// (including error pages served as HTML) stays opaque text. Success and
/// error paths use the same interpretation so a non-JSON error page is never
/// mistaken for JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    /// Body declared and parsed as JSON.
    Json(serde_json::Value),

    /// Body kept as opaque text.
    Text(String),
}

impl UpstreamBody {
    /// Render the body for log output, whichever variant it is.
    pub fn to_text(&self) -> String {
        match self {
            UpstreamBody::Json(value) => value.to_string(),
            UpstreamBody::Text(text) => text.clone(),
        }
    }
}

/// Errors surfaced by the credential broker and coverage mediation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BrokerError {
    /// Malformed or missing caller input, detected before any network call.
    #[error("Invalid value for '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    /// The caller supplied no bearer credential.
    #[error("Missing bearer credential")]
    Unauthenticated,

    /// The upstream answered with a non-success status or an unusable body.
    /// Status and body are preserved verbatim for observability and manual
    /// replay.
    #[error("Upstream responded with status {status}")]
    Upstream { status: u16, body: UpstreamBody },

    /// The upstream could not be reached at all (DNS, TCP, TLS, IO).
    #[error("Failed to reach upstream: {message}")]
    Transport { message: String },
}

impl BrokerError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BrokerError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn unauthenticated() -> Self {
        BrokerError::Unauthenticated
    }

    pub fn upstream(status: u16, body: UpstreamBody) -> Self {
        BrokerError::Upstream { status, body }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        BrokerError::Transport {
            message: message.into(),
        }
    }

    /// The originating upstream status code, when one exists.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            BrokerError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
