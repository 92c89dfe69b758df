//! HTTP DTOs for the coverage endpoints.
//!
//! Coverage payloads are opaque passthroughs: the broker does not model the
//! upstream coverage shape, so the response is rendered exactly as the
//! upstream produced it.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::domain::UpstreamBody;

/// Request for a payer-wide coverage lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageByPayerRequest {
    /// Insurance payer identifier.
    pub payer_id: String,
}

/// Upstream coverage payload relayed to the dashboard verbatim.
#[derive(Debug, Clone)]
pub struct CoveragePayload(pub UpstreamBody);

impl IntoResponse for CoveragePayload {
    fn into_response(self) -> Response {
        match self.0 {
            UpstreamBody::Json(value) => Json(value).into_response(),
            UpstreamBody::Text(text) => text.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use serde_json::json;

    #[test]
    fn payer_request_deserializes_camel_case() {
        let request: CoverageByPayerRequest =
            serde_json::from_str(r#"{"payerId": "aetna-123"}"#).unwrap();
        assert_eq!(request.payer_id, "aetna-123");
    }

    #[test]
    fn payer_request_rejects_missing_field() {
        let result = serde_json::from_str::<CoverageByPayerRequest>("{}");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn json_payload_renders_as_json() {
        let response = CoveragePayload(UpstreamBody::Json(json!({"active": true}))).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(content_type.to_str().unwrap().starts_with("application/json"));
    }

    #[tokio::test]
    async fn text_payload_renders_as_plain_text() {
        let response =
            CoveragePayload(UpstreamBody::Text("ELIGIBLE".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ELIGIBLE");
    }
}
