//! Two-stage authorization guard.
//!
//! Stage 1 (authentication) resolves the caller's bearer token through a
//! [`SessionProvider`] into an [`Identity`]. Stage 2 (authorization) gates
//! the identity's coarse [`Role`] against the operation's allowed set, then
//! consults the [`PermissionMatrix`] for the fine-grained grant. Session
//! resolution is the only suspension point; everything after it is a few
//! map lookups.

use crate::authz::matrix::PermissionMatrix;
use crate::authz::resource::{Action, Resource};
use crate::authz::role::{AdminRole, Role};
use crate::error::AppError;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

/// Resolved caller identity, handed to business logic on success so it can
/// stamp the actor on whatever it does next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: Uuid,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role: Option<AdminRole>,
}

/// Session resolution seam.
///
/// How the session was established (password, OAuth, anything else) is not
/// this crate's concern; a provider turns an opaque token into an identity
/// or into `None`. Expired, malformed and forged tokens are all `None` —
/// the guard treats every resolution failure identically.
pub trait SessionProvider: Send + Sync {
    fn resolve(&self, token: &str) -> impl Future<Output = Option<Identity>> + Send;
}

/// The guard itself: immutable matrix plus a session provider. Stateless
/// and reentrant; any number of requests may call it concurrently.
pub struct AuthzGuard<P> {
    matrix: Arc<PermissionMatrix>,
    sessions: P,
}

impl<P: SessionProvider> AuthzGuard<P> {
    pub fn new(matrix: Arc<PermissionMatrix>, sessions: P) -> Self {
        Self { matrix, sessions }
    }

    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// Stage 1: resolve the caller or reject with `Unauthenticated`.
    pub async fn authenticate(&self, token: Option<&str>) -> Result<Identity, AppError> {
        let Some(token) = token else {
            return Err(AppError::Unauthenticated);
        };

        self.sessions
            .resolve(token)
            .await
            .ok_or(AppError::Unauthenticated)
    }

    /// Stage 1 + coarse gate: the caller's role must be in `required`.
    pub async fn guard_role(
        &self,
        token: Option<&str>,
        required: &[Role],
    ) -> Result<Identity, AppError> {
        let identity = self.authenticate(token).await?;

        if !required.contains(&identity.role) {
            tracing::warn!(
                caller = %identity.id,
                role = %identity.role,
                "Coarse role gate rejected caller"
            );
            return Err(AppError::ForbiddenRole);
        }

        Ok(identity)
    }

    /// Combined entry point: authenticate, gate the coarse role, then check
    /// the fine-grained grant.
    ///
    /// The role gate always runs before the matrix is consulted. A caller
    /// with `Role::Admin` that passes the coarse gate bypasses the matrix
    /// entirely; every other caller must hold the (resource, action) grant
    /// through its admin role, and a missing admin role denies.
    pub async fn guard_with_permission(
        &self,
        token: Option<&str>,
        required: Role,
        resource: Resource,
        action: Action,
    ) -> Result<Identity, AppError> {
        let identity = self.guard_role(token, &[required]).await?;

        if identity.role == Role::Admin {
            return Ok(identity);
        }

        if self
            .matrix
            .has_permission(identity.admin_role, resource, action)
        {
            Ok(identity)
        } else {
            tracing::warn!(
                caller = %identity.id,
                resource = %resource,
                action = %action,
                "Permission gate rejected caller"
            );
            Err(AppError::ForbiddenPermission)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Token → identity map standing in for an external session store.
    struct StaticSessions {
        sessions: HashMap<String, Identity>,
    }

    impl StaticSessions {
        fn new(entries: &[(&str, Role, Option<AdminRole>)]) -> Self {
            let sessions = entries
                .iter()
                .map(|(token, role, admin_role)| {
                    (
                        token.to_string(),
                        Identity {
                            id: Uuid::new_v4(),
                            role: *role,
                            admin_role: *admin_role,
                        },
                    )
                })
                .collect();
            Self { sessions }
        }
    }

    impl SessionProvider for StaticSessions {
        async fn resolve(&self, token: &str) -> Option<Identity> {
            self.sessions.get(token).cloned()
        }
    }

    fn guard_with(entries: &[(&str, Role, Option<AdminRole>)]) -> AuthzGuard<StaticSessions> {
        AuthzGuard::new(
            Arc::new(PermissionMatrix::platform_default()),
            StaticSessions::new(entries),
        )
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthenticated() {
        let guard = guard_with(&[]);

        let err = guard.guard_role(None, &[Role::Admin]).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let guard = guard_with(&[("good", Role::Admin, None)]);

        let err = guard
            .guard_role(Some("stale"), &[Role::Admin])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_wrong_role_is_forbidden_role() {
        let guard = guard_with(&[("client", Role::Client, None)]);

        let err = guard
            .guard_role(Some("client"), &[Role::Admin])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenRole));
    }

    #[tokio::test]
    async fn test_role_gate_runs_before_permission_gate() {
        // A client whose hypothetical admin role would hold the grant is
        // still rejected on the coarse role, not the permission.
        let guard = guard_with(&[("client", Role::Client, Some(AdminRole::SuperAdmin))]);

        let err = guard
            .guard_with_permission(Some("client"), Role::Admin, Resource::Orders, Action::Read)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenRole));
    }

    #[tokio::test]
    async fn test_admin_bypasses_matrix() {
        // customer_support holds no manage grants on roles, but the coarse
        // Admin role outranks the matrix.
        let guard = guard_with(&[("support", Role::Admin, Some(AdminRole::CustomerSupport))]);

        let identity = guard
            .guard_with_permission(Some("support"), Role::Admin, Resource::Roles, Action::Manage)
            .await
            .unwrap();
        assert_eq!(identity.admin_role, Some(AdminRole::CustomerSupport));
    }

    #[tokio::test]
    async fn test_admin_with_no_admin_role_still_bypasses() {
        let guard = guard_with(&[("bare", Role::Admin, None)]);

        let identity = guard
            .guard_with_permission(
                Some("bare"),
                Role::Admin,
                Resource::SystemSettings,
                Action::Manage,
            )
            .await
            .unwrap();
        assert_eq!(identity.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_admin_does_not_bypass_coarse_gate() {
        // A required-role set that excludes Admin rejects an admin caller.
        let guard = guard_with(&[("support", Role::Admin, Some(AdminRole::CustomerSupport))]);

        let err = guard
            .guard_role(Some("support"), &[Role::Driver])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenRole));
    }

    #[tokio::test]
    async fn test_non_admin_required_role_reaches_matrix_and_denies() {
        let guard = guard_with(&[("driver", Role::Driver, None)]);

        let err = guard
            .guard_with_permission(
                Some("driver"),
                Role::Driver,
                Resource::Orders,
                Action::Read,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ForbiddenPermission));
    }

    #[tokio::test]
    async fn test_guard_role_accepts_any_listed_role() {
        let guard = guard_with(&[("driver", Role::Driver, None)]);

        let identity = guard
            .guard_role(Some("driver"), &[Role::Client, Role::Driver])
            .await
            .unwrap();
        assert_eq!(identity.role, Role::Driver);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_deterministic() {
        let guard = guard_with(&[("support", Role::Admin, Some(AdminRole::CustomerSupport))]);

        for _ in 0..3 {
            let result = guard
                .guard_with_permission(
                    Some("support"),
                    Role::Admin,
                    Resource::Roles,
                    Action::Manage,
                )
                .await;
            assert!(result.is_ok());

            let err = guard
                .guard_role(Some("support"), &[Role::Client])
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::ForbiddenRole));
        }
    }
}
