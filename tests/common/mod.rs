//! Shared test helpers.

use logistics_authz::{
    authz::{AdminRole, AuthzGuard, PermissionMatrix, Role},
    config::{AppConfig, LoggingConfig, SecurityConfig, ServerConfig},
    middleware::AppState,
    session::{JwtService, JwtSessionProvider},
};
use secrecy::Secret;
use std::sync::Arc;
use uuid::Uuid;

/// Create test configuration.
pub fn create_test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new("test-secret-key-for-testing-only-min-32-chars".to_string()),
            access_token_exp_secs: 300,
        },
    }
}

/// Build the app state with the shipped platform matrix.
pub fn create_test_app_state() -> Arc<AppState> {
    let config = create_test_config();
    let matrix = Arc::new(PermissionMatrix::platform_default());
    let jwt = JwtService::from_config(&config).expect("test jwt service");
    let guard = Arc::new(AuthzGuard::new(matrix, JwtSessionProvider::new(jwt)));

    Arc::new(AppState { config, guard })
}

/// Mint an access token for a caller with the given roles.
pub fn mint_token(role: Role, admin_role: Option<AdminRole>) -> String {
    let jwt = JwtService::from_config(&create_test_config()).expect("test jwt service");
    jwt.issue_access_token(&Uuid::new_v4(), role, admin_role)
        .expect("token")
}
