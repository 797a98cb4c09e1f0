//! Authorization core: domain enumerations, the static permission matrix
//! and the two-stage request guard.

pub mod guard;
pub mod matrix;
pub mod resource;
pub mod role;

pub use guard::{AuthzGuard, Identity, SessionProvider};
pub use matrix::{PermissionMatrix, PermissionMatrixBuilder};
pub use resource::{Action, Resource};
pub use role::{AdminRole, Role};
