//! Session introspection handlers.

use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::authz::Role;
use crate::error::AppError;
use crate::middleware::AppState;
use crate::session::bearer_token;

/// Echo the caller's resolved identity. Any authenticated role may ask.
pub async fn whoami(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = bearer_token(&headers);
    let identity = state
        .guard
        .guard_role(token.as_deref(), &Role::ALL)
        .await?;

    Ok(Json(json!({ "identity": identity })))
}
