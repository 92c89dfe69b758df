//! HTTP handlers for the token endpoint.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::adapters::http::{ApiError, AppState};

use super::dto::TokenResponse;

/// POST /api/token - Issue or return the cached access credential.
///
/// The broker reuses the cached credential while it is valid; otherwise a
/// fresh one is obtained through the client-credentials grant and cached.
pub async fn issue_token(State(state): State<AppState>) -> Result<Json<TokenResponse>, ApiError> {
    let credential = state.broker.get_valid_credential().await?;

    Ok(Json(TokenResponse::from_credential(&credential, Utc::now())))
}
