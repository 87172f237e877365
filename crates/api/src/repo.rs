//! In-memory store of per-user dashboard layouts.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use vitalboard_core::defaults::default_widgets;
use vitalboard_core::widget::{DashboardLayoutData, WidgetConfig};

/// Provides load/save/reset operations for per-user dashboard layouts.
///
/// Keyed by the opaque user key from [`crate::middleware::auth::AuthUser`].
/// One layout per user; a save replaces the previous one wholesale.
#[derive(Default)]
pub struct LayoutRepo {
    layouts: RwLock<HashMap<String, DashboardLayoutData>>,
}

impl LayoutRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a user's layout. Returns `None` if none was stored yet.
    pub async fn find_by_user(&self, user_key: &str) -> Option<DashboardLayoutData> {
        self.layouts.read().await.get(user_key).cloned()
    }

    /// Store `widgets` as the user's layout, stamped with the current time.
    pub async fn upsert(&self, user_key: &str, widgets: Vec<WidgetConfig>) -> DashboardLayoutData {
        let layout = DashboardLayoutData {
            widgets,
            last_modified: Utc::now(),
        };
        self.layouts
            .write()
            .await
            .insert(user_key.to_string(), layout.clone());
        layout
    }

    /// Replace the user's layout with the built-in defaults.
    pub async fn reset(&self, user_key: &str) -> DashboardLayoutData {
        self.upsert(user_key, default_widgets()).await
    }

    /// Number of users with a stored layout.
    pub async fn len(&self) -> usize {
        self.layouts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
