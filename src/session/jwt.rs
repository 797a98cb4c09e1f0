//! JWT token validation and issuance.
//!
//! Access tokens carry the caller's coarse role and, for admin accounts,
//! the fine-grained administrative role. Validation failures of any kind
//! (bad signature, expiry, wrong token type, unparseable claims) resolve
//! to "no session" rather than distinct errors: the guard fails closed.

use crate::authz::{AdminRole, Identity, Role, SessionProvider};
use crate::config::AppConfig;
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (account ID).
    pub sub: String,

    /// Coarse role (wire name, e.g. "admin").
    pub role: String,

    /// Fine-grained administrative role, admin accounts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role: Option<String>,

    /// Token type; only "access" tokens resolve to a session.
    pub token_type: String,

    /// Issued at.
    pub iat: i64,

    /// Expiration.
    pub exp: i64,

    /// JWT ID (unique token identifier).
    pub jti: String,
}

/// JWT encode/decode service.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_exp_secs: u64,
}

impl JwtService {
    /// Create JWT service from config.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.jwt_secret.expose_secret();

        // HS256 wants at least 32 bytes of key material.
        if secret.len() < 32 {
            return Err(AppError::Config(
                "JWT secret too short (min 32 chars)".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_exp_secs: config.security.access_token_exp_secs,
        })
    }

    /// Issue an access token for an account. Used by tests and ops tooling;
    /// interactive sign-in flows live outside this service.
    pub fn issue_access_token(
        &self,
        account_id: &Uuid,
        role: Role,
        admin_role: Option<AdminRole>,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + Duration::seconds(self.access_token_exp_secs as i64);

        let claims = Claims {
            sub: account_id.to_string(),
            role: role.as_str().to_string(),
            admin_role: admin_role.map(|r| r.as_str().to_string()),
            token_type: "access".to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            AppError::Internal(format!("Failed to encode access token: {}", e))
        })
    }

    /// Validate and decode an access token.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            tracing::debug!("Token validation failed: {:?}", e);
            AppError::Unauthenticated
        })?
        .claims;

        if claims.token_type != "access" {
            tracing::debug!(
                "Token type mismatch: expected 'access', got '{}'",
                claims.token_type
            );
            return Err(AppError::Unauthenticated);
        }

        Ok(claims)
    }
}

/// [`SessionProvider`] backed by locally-validated JWTs.
pub struct JwtSessionProvider {
    jwt: JwtService,
}

impl JwtSessionProvider {
    pub fn new(jwt: JwtService) -> Self {
        Self { jwt }
    }
}

impl SessionProvider for JwtSessionProvider {
    async fn resolve(&self, token: &str) -> Option<Identity> {
        let claims = self.jwt.validate_access_token(token).ok()?;

        // Claims minted by an older deploy may carry names this build no
        // longer knows; an unparseable claim is an invalid session.
        let id = Uuid::parse_str(&claims.sub).ok()?;
        let role = Role::parse(&claims.role)?;
        let admin_role = match claims.admin_role.as_deref() {
            Some(name) => Some(AdminRole::parse(name)?),
            None => None,
        };

        Some(Identity {
            id,
            role,
            admin_role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LoggingConfig, SecurityConfig, ServerConfig};
    use secrecy::Secret;

    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:3000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
                access_token_exp_secs: 900,
            },
        }
    }

    #[test]
    fn test_issue_and_validate_access_token() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let account_id = Uuid::new_v4();

        let token = service
            .issue_access_token(&account_id, Role::Admin, Some(AdminRole::FinanceManager))
            .unwrap();

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.admin_role.as_deref(), Some("finance_manager"));
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn test_invalid_token_fails() {
        let service = JwtService::from_config(&test_config()).unwrap();
        assert!(service.validate_access_token("invalid_token").is_err());
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = test_config();
        config.security.jwt_secret = Secret::new("short".to_string());
        assert!(JwtService::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_provider_resolves_identity() {
        let service = JwtService::from_config(&test_config()).unwrap();
        let account_id = Uuid::new_v4();
        let token = service
            .issue_access_token(&account_id, Role::Driver, None)
            .unwrap();

        let provider = JwtSessionProvider::new(JwtService::from_config(&test_config()).unwrap());
        let identity = provider.resolve(&token).await.unwrap();
        assert_eq!(identity.id, account_id);
        assert_eq!(identity.role, Role::Driver);
        assert_eq!(identity.admin_role, None);
    }

    #[tokio::test]
    async fn test_provider_fails_closed_on_garbage() {
        let provider = JwtSessionProvider::new(JwtService::from_config(&test_config()).unwrap());
        assert!(provider.resolve("not-a-jwt").await.is_none());
    }

    #[tokio::test]
    async fn test_provider_fails_closed_on_foreign_signature() {
        let mut other = test_config();
        other.security.jwt_secret =
            Secret::new("another_secret_key_32_characters_xx".to_string());
        let foreign = JwtService::from_config(&other).unwrap();
        let token = foreign
            .issue_access_token(&Uuid::new_v4(), Role::Admin, None)
            .unwrap();

        let provider = JwtSessionProvider::new(JwtService::from_config(&test_config()).unwrap());
        assert!(provider.resolve(&token).await.is_none());
    }
}
