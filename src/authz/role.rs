//! Coarse and fine-grained role enumerations.
//!
//! Both enumerations are closed: adding a role is a source change, so the
//! whole policy surface stays visible in one artifact and typos cannot
//! produce a silently-denying role name at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse account role. Decides which broad section of the platform a
/// caller may enter at all. Assigned at account creation, changed only by
/// an explicit administrative action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Client,
    Driver,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Client, Role::Driver];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Client => "client",
            Role::Driver => "driver",
        }
    }

    /// Parse a wire-format role name. Unknown names return `None`; callers
    /// at the session boundary treat that as an invalid session.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "client" => Some(Role::Client),
            "driver" => Some(Role::Driver),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained administrative role, meaningful only when [`Role::Admin`].
/// Exactly one per admin account; mutated only through the dedicated
/// role-update operation, never self-assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    PlatformManager,
    OperationsManager,
    CustomerSupport,
    FinanceManager,
    ComplianceOfficer,
}

impl AdminRole {
    pub const ALL: [AdminRole; 6] = [
        AdminRole::SuperAdmin,
        AdminRole::PlatformManager,
        AdminRole::OperationsManager,
        AdminRole::CustomerSupport,
        AdminRole::FinanceManager,
        AdminRole::ComplianceOfficer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "super_admin",
            AdminRole::PlatformManager => "platform_manager",
            AdminRole::OperationsManager => "operations_manager",
            AdminRole::CustomerSupport => "customer_support",
            AdminRole::FinanceManager => "finance_manager",
            AdminRole::ComplianceOfficer => "compliance_officer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(AdminRole::SuperAdmin),
            "platform_manager" => Some(AdminRole::PlatformManager),
            "operations_manager" => Some(AdminRole::OperationsManager),
            "customer_support" => Some(AdminRole::CustomerSupport),
            "finance_manager" => Some(AdminRole::FinanceManager),
            "compliance_officer" => Some(AdminRole::ComplianceOfficer),
            _ => None,
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
