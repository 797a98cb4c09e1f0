//! HTTP handlers.

pub mod health;
pub mod permissions;
pub mod session;
