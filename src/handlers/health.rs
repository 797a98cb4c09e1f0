//! Health check handlers.
//! Provides the /health and /ready endpoints.

use axum::{extract::State, Json};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::middleware::AppState;

/// Liveness probe response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Readiness probe response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<HealthCheck>,
}

/// Single readiness check item.
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Application start time, set once in main.
static APP_START_TIME: OnceCell<u64> = OnceCell::new();

pub fn set_start_time() {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let _ = APP_START_TIME.set(now);
}

pub fn get_uptime() -> u64 {
    APP_START_TIME.get().map_or(0, |start| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(*start)
            .saturating_sub(*start)
    })
}

/// Liveness probe. Fast, no dependency checks.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: get_uptime(),
    })
}

/// Readiness probe. The only dependency of this service is the in-process
/// permission matrix, so readiness reports its shape.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    let role_count = state.guard.matrix().role_count();

    let checks = vec![HealthCheck {
        name: "permission_matrix".to_string(),
        status: if role_count > 0 { "ok" } else { "error" }.to_string(),
        message: Some(format!("{} administrative roles loaded", role_count)),
    }];

    let ready = checks.iter().all(|c| c.status == "ok");

    Json(ReadinessResponse { ready, checks })
}
