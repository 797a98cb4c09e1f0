//! Unified error model.
//!
//! The three guard outcomes (`Unauthenticated`, `ForbiddenRole`,
//! `ForbiddenPermission`) are distinct variants so callers and tests can
//! tell them apart, even though the transport collapses both forbidden
//! kinds to 403. The `kind` string in the response body preserves the
//! distinction across the boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Role not permitted for this operation")]
    ForbiddenRole,

    #[error("Administrative role lacks the required permission")]
    ForbiddenPermission,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Transport-level status code. Mapping the two forbidden kinds to the
    /// same 403 is a boundary concern; the kinds stay distinct in the body.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenRole | AppError::ForbiddenPermission => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind for response bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthenticated => "unauthenticated",
            AppError::ForbiddenRole => "forbidden_role",
            AppError::ForbiddenPermission => "forbidden_permission",
            AppError::BadRequest(_) => "bad_request",
            AppError::NotFound => "not_found",
            AppError::Config(_) => "config",
            AppError::Internal(_) => "internal",
        }
    }

    /// User-facing message, free of internal detail.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthenticated => "Authentication required".to_string(),
            AppError::ForbiddenRole => "Access denied".to_string(),
            AppError::ForbiddenPermission => "Access denied".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound => "Resource not found".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// Error response DTO.
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub kind: String,
    pub message: String,
    pub request_id: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                kind: self.kind().to_string(),
                message: self.user_message(),
                request_id,
            },
        };

        // Denials are routine; only server-side faults log at error level.
        if status.is_server_error() {
            tracing::error!(
                code = self.code(),
                kind = self.kind(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Application error"
            );
        } else {
            tracing::warn!(
                code = self.code(),
                kind = self.kind(),
                request_id = %error_response.error.request_id,
                "Request rejected"
            );
        }

        (status, Json(error_response)).into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
