//! Static permission matrix.
//!
//! The matrix is the whole fine-grained policy in one artifact: a relation
//! AdminRole × Action → set of Resource, built once at process start and
//! immutable afterwards. There is no inheritance, no wildcard matching and
//! no implied grant; every (role, action, resource) triple is enumerated in
//! [`PermissionMatrix::platform_default`]. Policy changes are source changes.

use crate::authz::resource::{Action, Resource};
use crate::authz::role::AdminRole;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Grants for one administrative role: all five actions are always present
/// as keys, possibly mapping to empty sets.
pub type ActionGrants = HashMap<Action, HashSet<Resource>>;

/// Fallback for lookups that miss the table. Lookups on a correctly built
/// matrix never reach it, but authorization must fail closed, not panic.
static NO_GRANTS: Lazy<ActionGrants> = Lazy::new(|| {
    Action::ALL
        .into_iter()
        .map(|action| (action, HashSet::new()))
        .collect()
});

/// Immutable AdminRole × Action → set<Resource> relation.
#[derive(Debug, Clone)]
pub struct PermissionMatrix {
    grants: HashMap<AdminRole, ActionGrants>,
}

impl PermissionMatrix {
    pub fn builder() -> PermissionMatrixBuilder {
        PermissionMatrixBuilder::new()
    }

    /// May `admin_role` perform `action` on `resource`?
    ///
    /// Total and infallible: a missing role (`None`) or an empty grant set
    /// answers `false`. Absence of evidence is always denial.
    pub fn has_permission(
        &self,
        admin_role: Option<AdminRole>,
        resource: Resource,
        action: Action,
    ) -> bool {
        let Some(admin_role) = admin_role else {
            return false;
        };

        self.grants
            .get(&admin_role)
            .and_then(|actions| actions.get(&action))
            .is_some_and(|resources| resources.contains(&resource))
    }

    /// Full grant map for one role. Always contains all five action keys,
    /// so callers can iterate without presence checks.
    pub fn role_permissions(&self, admin_role: AdminRole) -> &ActionGrants {
        self.grants.get(&admin_role).unwrap_or(&NO_GRANTS)
    }

    /// Administrative introspection: which roles hold (`resource`, `action`)?
    ///
    /// Computed by scanning the table in declaration order. The table is
    /// small and invariant, so the scan is fine off the hot path.
    pub fn roles_with_permission(&self, resource: Resource, action: Action) -> Vec<AdminRole> {
        AdminRole::ALL
            .into_iter()
            .filter(|role| self.has_permission(Some(*role), resource, action))
            .collect()
    }

    /// Number of roles with a table entry.
    pub fn role_count(&self) -> usize {
        self.grants.len()
    }

    /// The shipped platform policy. Every grant is listed explicitly; read
    /// this function top to bottom to audit the entire policy.
    pub fn platform_default() -> Self {
        use Action::*;
        use Resource::*;

        Self::builder()
            // super_admin: every action on every resource.
            .grant(AdminRole::SuperAdmin, Create, &Resource::ALL)
            .grant(AdminRole::SuperAdmin, Read, &Resource::ALL)
            .grant(AdminRole::SuperAdmin, Update, &Resource::ALL)
            .grant(AdminRole::SuperAdmin, Delete, &Resource::ALL)
            .grant(AdminRole::SuperAdmin, Manage, &Resource::ALL)
            // platform_manager: runs the marketplace, no payment mutation,
            // no role/system administration.
            .grant(
                AdminRole::PlatformManager,
                Create,
                &[User, Client, Driver, Promotions, Reports],
            )
            .grant(
                AdminRole::PlatformManager,
                Read,
                &[
                    Profile, Orders, Payment, User, Client, Driver, Settings, Analytics, Reports,
                    Promotions, AuditLogs,
                ],
            )
            .grant(
                AdminRole::PlatformManager,
                Update,
                &[Profile, Orders, User, Client, Driver, Settings, Promotions, OrderPriority],
            )
            .grant(AdminRole::PlatformManager, Delete, &[Promotions])
            .grant(
                AdminRole::PlatformManager,
                Manage,
                &[DriverAssignments, Promotions, OrderPriority],
            )
            // operations_manager: dispatch floor, assignments and priorities.
            .grant(AdminRole::OperationsManager, Create, &[DriverAssignments])
            .grant(
                AdminRole::OperationsManager,
                Read,
                &[
                    Profile, Orders, Client, Driver, Analytics, Reports, DriverAssignments,
                    OrderPriority,
                ],
            )
            .grant(
                AdminRole::OperationsManager,
                Update,
                &[Orders, DriverAssignments, OrderPriority],
            )
            .grant(
                AdminRole::OperationsManager,
                Manage,
                &[DriverAssignments, OrderPriority],
            )
            // customer_support: read the accounts it serves, fix orders and
            // profiles, create and delete nothing.
            .grant(
                AdminRole::CustomerSupport,
                Read,
                &[Profile, Orders, Client, Driver],
            )
            .grant(AdminRole::CustomerSupport, Update, &[Profile, Orders])
            // finance_manager: money in, money out, no delete grants at all.
            .grant(AdminRole::FinanceManager, Create, &[Invoices])
            .grant(
                AdminRole::FinanceManager,
                Read,
                &[Orders, Payment, Analytics, Reports, Payouts, Invoices],
            )
            .grant(
                AdminRole::FinanceManager,
                Update,
                &[Payment, Payouts, Invoices],
            )
            .grant(AdminRole::FinanceManager, Manage, &[Payouts, Invoices])
            // compliance_officer: broad read access, owns security posture
            // and the audit trail.
            .grant(AdminRole::ComplianceOfficer, Create, &[Reports])
            .grant(
                AdminRole::ComplianceOfficer,
                Read,
                &[
                    Profile, Orders, Payment, Security, User, Client, Driver, Reports, AuditLogs,
                ],
            )
            .grant(AdminRole::ComplianceOfficer, Update, &[Security])
            .grant(AdminRole::ComplianceOfficer, Manage, &[Security, AuditLogs])
            .build()
    }
}

/// Builder for [`PermissionMatrix`].
///
/// Pre-seeds every (role, action) cell with an empty set, which is what
/// makes the completeness invariant hold by construction: a role the policy
/// never mentions still has all five action keys and denies everything.
pub struct PermissionMatrixBuilder {
    grants: HashMap<AdminRole, ActionGrants>,
}

impl PermissionMatrixBuilder {
    fn new() -> Self {
        let grants = AdminRole::ALL
            .into_iter()
            .map(|role| {
                let actions = Action::ALL
                    .into_iter()
                    .map(|action| (action, HashSet::new()))
                    .collect();
                (role, actions)
            })
            .collect();

        Self { grants }
    }

    /// Add `resources` to the (`role`, `action`) grant set.
    pub fn grant(mut self, role: AdminRole, action: Action, resources: &[Resource]) -> Self {
        let cell = self
            .grants
            .entry(role)
            .or_insert_with(|| NO_GRANTS.clone())
            .entry(action)
            .or_default();
        cell.extend(resources.iter().copied());
        self
    }

    pub fn build(self) -> PermissionMatrix {
        PermissionMatrix {
            grants: self.grants,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_is_complete_and_denies() {
        let matrix = PermissionMatrix::builder().build();

        for role in AdminRole::ALL {
            let grants = matrix.role_permissions(role);
            assert_eq!(grants.len(), Action::ALL.len());
            for action in Action::ALL {
                assert!(grants[&action].is_empty());
                for resource in Resource::ALL {
                    assert!(!matrix.has_permission(Some(role), resource, action));
                }
            }
        }
    }

    #[test]
    fn test_none_role_always_denies() {
        let matrix = PermissionMatrix::platform_default();

        for resource in Resource::ALL {
            for action in Action::ALL {
                assert!(!matrix.has_permission(None, resource, action));
            }
        }
    }

    #[test]
    fn test_grant_is_additive_and_exact() {
        let matrix = PermissionMatrix::builder()
            .grant(AdminRole::CustomerSupport, Action::Read, &[Resource::Orders])
            .grant(
                AdminRole::CustomerSupport,
                Action::Read,
                &[Resource::Profile],
            )
            .build();

        assert!(matrix.has_permission(
            Some(AdminRole::CustomerSupport),
            Resource::Orders,
            Action::Read
        ));
        assert!(matrix.has_permission(
            Some(AdminRole::CustomerSupport),
            Resource::Profile,
            Action::Read
        ));
        // Read grants imply nothing about other actions.
        assert!(!matrix.has_permission(
            Some(AdminRole::CustomerSupport),
            Resource::Orders,
            Action::Update
        ));
    }

    #[test]
    fn test_manage_is_not_a_superset() {
        let matrix = PermissionMatrix::platform_default();

        // finance_manager manages payouts but has no payout delete grant.
        assert!(matrix.has_permission(
            Some(AdminRole::FinanceManager),
            Resource::Payouts,
            Action::Manage
        ));
        assert!(!matrix.has_permission(
            Some(AdminRole::FinanceManager),
            Resource::Payouts,
            Action::Delete
        ));
    }

    #[test]
    fn test_roles_with_permission_scans_in_declaration_order() {
        let matrix = PermissionMatrix::platform_default();

        let roles = matrix.roles_with_permission(Resource::Payment, Action::Update);
        assert_eq!(
            roles,
            vec![AdminRole::SuperAdmin, AdminRole::FinanceManager]
        );

        // Only super_admin may delete payments.
        let roles = matrix.roles_with_permission(Resource::Payment, Action::Delete);
        assert_eq!(roles, vec![AdminRole::SuperAdmin]);
    }
}
