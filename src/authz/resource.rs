//! Protected resource categories and the actions that can target them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A protected category of platform data. Resources are identifiers only;
/// they carry no lifecycle of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Profile,
    Orders,
    Payment,
    Security,
    User,
    Client,
    Driver,
    Settings,
    Analytics,
    Reports,
    Roles,
    Permissions,
    SystemSettings,
    DriverAssignments,
    Promotions,
    OrderPriority,
    Payouts,
    Invoices,
    AuditLogs,
}

impl Resource {
    pub const ALL: [Resource; 19] = [
        Resource::Profile,
        Resource::Orders,
        Resource::Payment,
        Resource::Security,
        Resource::User,
        Resource::Client,
        Resource::Driver,
        Resource::Settings,
        Resource::Analytics,
        Resource::Reports,
        Resource::Roles,
        Resource::Permissions,
        Resource::SystemSettings,
        Resource::DriverAssignments,
        Resource::Promotions,
        Resource::OrderPriority,
        Resource::Payouts,
        Resource::Invoices,
        Resource::AuditLogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Orders => "orders",
            Resource::Payment => "payment",
            Resource::Security => "security",
            Resource::User => "user",
            Resource::Client => "client",
            Resource::Driver => "driver",
            Resource::Settings => "settings",
            Resource::Analytics => "analytics",
            Resource::Reports => "reports",
            Resource::Roles => "roles",
            Resource::Permissions => "permissions",
            Resource::SystemSettings => "system_settings",
            Resource::DriverAssignments => "driver_assignments",
            Resource::Promotions => "promotions",
            Resource::OrderPriority => "order_priority",
            Resource::Payouts => "payouts",
            Resource::Invoices => "invoices",
            Resource::AuditLogs => "audit_logs",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Resource::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action namespace. `Manage` is an independent namespace for cross-cutting
/// operational capabilities, not a superset of the other four; each action's
/// resource set is enumerated on its own in the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Manage,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
        Action::Manage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Manage => "manage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Action::Create),
            "read" => Some(Action::Read),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "manage" => Some(Action::Manage),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_parse_round_trip() {
        for resource in Resource::ALL {
            assert_eq!(Resource::parse(resource.as_str()), Some(resource));
        }
    }

    #[test]
    fn test_action_parse_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_unknown_names_do_not_parse() {
        assert_eq!(Resource::parse("payments"), None);
        assert_eq!(Resource::parse("ORDERS"), None);
        assert_eq!(Action::parse("write"), None);
    }
}
