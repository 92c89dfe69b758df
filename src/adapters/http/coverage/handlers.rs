//! HTTP handlers for the coverage endpoints.

use std::future::Future;
use std::pin::Pin;

use axum::extract::{FromRequestParts, Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;

use crate::adapters::http::{ApiError, AppState};
use crate::domain::BrokerError;

use super::dto::{CoverageByPayerRequest, CoveragePayload};

/// Bearer credential extracted from the caller's `Authorization` header.
///
/// Extraction happens before the handler body runs, so a request without a
/// usable bearer token is rejected with 401 before any upstream call. The
/// broker re-checks the token for emptiness as its own pre-condition; the
/// extractor exists so the HTTP layer fails in the same uniform shape.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let token = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .ok_or(ApiError::Broker(BrokerError::Unauthenticated))?;

            Ok(BearerToken(token.to_string()))
        })
    }
}

/// GET /api/coverages/:id - Proxy a single coverage lookup.
pub async fn get_coverage(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(coverage_id): Path<String>,
) -> Result<CoveragePayload, ApiError> {
    let body = state.broker.coverage_by_id(&coverage_id, &token).await?;

    Ok(CoveragePayload(body))
}

/// POST /api/coverages - Proxy a payer-wide coverage lookup.
pub async fn lookup_coverages_by_payer(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Json(request): Json<CoverageByPayerRequest>,
) -> Result<CoveragePayload, ApiError> {
    let body = state
        .broker
        .coverages_by_payer(&request.payer_id, &token)
        .await?;

    Ok(CoveragePayload(body))
}
