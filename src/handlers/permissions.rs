//! Permission matrix introspection handlers.
//!
//! All endpoints are admin-guarded reads over the static matrix: the grant
//! map of one role, the roles holding one grant, and a fail-closed check
//! of an arbitrary (admin_role, resource, action) triple.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::authz::{Action, AdminRole, Resource, Role};
use crate::error::AppError;
use crate::middleware::AppState;
use crate::session::bearer_token;

/// Full five-action grant map for one administrative role.
pub async fn role_permissions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(admin_role): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let token = bearer_token(&headers);
    state
        .guard
        .guard_with_permission(token.as_deref(), Role::Admin, Resource::Permissions, Action::Read)
        .await?;

    // A malformed URL segment is a caller mistake, not a policy answer.
    let admin_role = AdminRole::parse(&admin_role)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown admin role: {}", admin_role)))?;

    let grants = state.guard.matrix().role_permissions(admin_role);

    // Stable ordering for readers and tests.
    let mut permissions: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for action in Action::ALL {
        let mut resources: Vec<&'static str> = grants
            .get(&action)
            .map(|set| set.iter().map(|r| r.as_str()).collect())
            .unwrap_or_default();
        resources.sort_unstable();
        permissions.insert(action.as_str(), resources);
    }

    Ok(Json(json!({
        "admin_role": admin_role,
        "permissions": permissions,
    })))
}

/// Which administrative roles hold (resource, action)?
/// The audit question, e.g. "who can delete payments".
pub async fn roles_with_permission(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path((resource, action)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let token = bearer_token(&headers);
    state
        .guard
        .guard_with_permission(token.as_deref(), Role::Admin, Resource::Permissions, Action::Read)
        .await?;

    let resource = Resource::parse(&resource)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown resource: {}", resource)))?;
    let action = Action::parse(&action)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown action: {}", action)))?;

    let roles = state.guard.matrix().roles_with_permission(resource, action);

    Ok(Json(json!({
        "resource": resource,
        "action": action,
        "admin_roles": roles,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PermissionCheckRequest {
    pub admin_role: String,
    pub resource: String,
    pub action: String,
}

/// Evaluate one (admin_role, resource, action) triple.
///
/// Names the matrix does not know answer `allowed: false`, never 400: a
/// policy query fails closed on unknown input instead of erroring.
pub async fn check_permission(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PermissionCheckRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = bearer_token(&headers);
    state
        .guard
        .guard_with_permission(token.as_deref(), Role::Admin, Resource::Permissions, Action::Read)
        .await?;

    let allowed = match (
        AdminRole::parse(&req.admin_role),
        Resource::parse(&req.resource),
        Action::parse(&req.action),
    ) {
        (Some(admin_role), Some(resource), Some(action)) => {
            state
                .guard
                .matrix()
                .has_permission(Some(admin_role), resource, action)
        }
        _ => false,
    };

    Ok(Json(json!({
        "admin_role": req.admin_role,
        "resource": req.resource,
        "action": req.action,
        "allowed": allowed,
    })))
}
