//! Vitalboard layout API server library.
//!
//! Reference implementation of the dashboard layout endpoints. Exposes the
//! building blocks (config, state, error handling, routes) so integration
//! tests and the binary entrypoint share one router.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod repo;
pub mod router;
pub mod routes;
pub mod state;
