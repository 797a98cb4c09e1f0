//! Route registration.
//! Builds the API router and applies the middleware stack.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{handlers, middleware::AppState};

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public probes.
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // Guarded endpoints. The guard runs inside each handler so the three
    // denial kinds surface through the unified error response.
    let api_routes = Router::new()
        .route("/api/v1/session/me", get(handlers::session::whoami))
        .route(
            "/api/v1/permissions/roles/{admin_role}",
            get(handlers::permissions::role_permissions),
        )
        .route(
            "/api/v1/permissions/resources/{resource}/{action}",
            get(handlers::permissions::roles_with_permission),
        )
        .route(
            "/api/v1/permissions/check",
            post(handlers::permissions::check_permission),
        );

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(middleware::from_fn(
            crate::middleware::request_tracking_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
