pub mod dashboard_layout;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /users/dashboard-layout         get, put
/// /users/dashboard-layout/reset   post
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/users/dashboard-layout", dashboard_layout::router())
}
