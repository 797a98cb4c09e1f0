//! Logistics platform authorization service.
//! Static permission matrix plus the two-stage request guard, with the
//! HTTP boundary that exposes them.

pub mod authz;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod telemetry;
