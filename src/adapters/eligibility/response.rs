//! Shared interpretation of upstream response bodies.
//!
//! The eligibility API is not consistent about error bodies: token and
//! coverage endpoints return JSON on success but may serve HTML or plain-text
//! error pages through intermediate proxies. Interpretation is therefore
//! driven by the declared content type, and the same rule applies to success
//! and error paths so a non-JSON error page is never mistaken for JSON.

use crate::domain::{BrokerError, UpstreamBody};

/// Interpret a response body according to its declared content type.
///
/// Declared `application/json` and parseable → [`UpstreamBody::Json`];
/// everything else, including JSON declarations that fail to parse, stays
/// opaque [`UpstreamBody::Text`]. Callers that require structure (the token
/// exchange) treat a non-JSON result as a malformed body.
pub fn interpret_body(content_type: Option<&str>, text: String) -> UpstreamBody {
    let declares_json = content_type
        .map(|value| value.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false);

    if declares_json {
        match serde_json::from_str(&text) {
            Ok(value) => UpstreamBody::Json(value),
            Err(_) => UpstreamBody::Text(text),
        }
    } else {
        UpstreamBody::Text(text)
    }
}

/// Status and interpreted body of one upstream exchange.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UpstreamResponse {
    pub status: u16,
    pub body: UpstreamBody,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Success keeps the body as an opaque passthrough; anything else becomes
    /// an upstream error carrying status and body verbatim.
    pub fn into_result(self) -> Result<UpstreamBody, BrokerError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(BrokerError::upstream(self.status, self.body))
        }
    }
}

/// Drain a reqwest response into an [`UpstreamResponse`].
pub(crate) async fn read_response(
    response: reqwest::Response,
) -> Result<UpstreamResponse, BrokerError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let text = response
        .text()
        .await
        .map_err(|e| BrokerError::transport(e.to_string()))?;

    Ok(UpstreamResponse {
        status,
        body: interpret_body(content_type.as_deref(), text),
    })
}
