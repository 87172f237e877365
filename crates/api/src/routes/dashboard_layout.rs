//! Route definitions for the dashboard layout.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard_layout;
use crate::state::AppState;

/// Layout routes mounted at `/users/dashboard-layout`.
///
/// ```text
/// GET   /        -> get_layout
/// PUT   /        -> save_layout
/// POST  /reset   -> reset_layout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(dashboard_layout::get_layout).put(dashboard_layout::save_layout),
        )
        .route("/reset", post(dashboard_layout::reset_layout))
}
