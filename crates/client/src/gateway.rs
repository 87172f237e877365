//! Persistence gateway abstraction.
//!
//! The store talks to the layout backend only through [`LayoutGateway`], so
//! tests and alternative transports can stand in for the HTTP binding in
//! [`crate::http`].

use async_trait::async_trait;
use vitalboard_core::widget::{DashboardLayoutData, WidgetConfig};

/// Errors from the persistence gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The layout API returned a non-2xx status code.
    #[error("Layout API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Load, save and reset operations on the caller's dashboard layout.
#[async_trait]
pub trait LayoutGateway: Send + Sync {
    /// Fetch the stored layout. `Ok(None)` means the user has none yet.
    async fn fetch_layout(&self) -> Result<Option<DashboardLayoutData>, GatewayError>;

    /// Replace the stored widget list and return the stored layout.
    async fn save_layout(&self, widgets: &[WidgetConfig]) -> Result<DashboardLayoutData, GatewayError>;

    /// Restore the server-chosen default layout and return it.
    async fn reset_layout(&self) -> Result<DashboardLayoutData, GatewayError>;
}
