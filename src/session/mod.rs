//! Session token validation.
//!
//! Session establishment lives outside this service; these modules only
//! turn a bearer token carried on a request into a resolved identity.

pub mod jwt;

pub use jwt::{Claims, JwtService, JwtSessionProvider};

use axum::http::HeaderMap;

/// Extract the bearer token from the Authorization header, if any.
/// Absence is not an error here; the guard decides what absence means.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}
