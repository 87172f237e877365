use std::sync::Arc;

use crate::config::ServerConfig;
use crate::repo::LayoutRepo;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-user dashboard layouts.
    pub layouts: Arc<LayoutRepo>,
}

impl AppState {
    /// State with an empty layout repository.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            layouts: Arc::new(LayoutRepo::new()),
        }
    }
}
