//! Handlers for the per-user dashboard widget layout.
//!
//! A user without a stored layout gets a 404 from `GET`; clients fall back
//! to the built-in defaults until the first save or reset.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use vitalboard_core::error::CoreError;
use vitalboard_core::validation::validate_layout;
use vitalboard_core::widget::SaveLayoutRequest;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/users/dashboard-layout
///
/// Return the caller's stored layout.
pub async fn get_layout(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let layout = state
        .layouts
        .find_by_user(&user.user_key)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DashboardLayout",
            id: "current user".into(),
        }))?;

    Ok(Json(layout))
}

/// PUT /api/v1/users/dashboard-layout
///
/// Validate and store the caller's widget list, echoing the stored layout.
/// A body that does not parse is a 400 `BAD_REQUEST`.
pub async fn save_layout(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<SaveLayoutRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    validate_layout(&input.widgets)?;

    let layout = state.layouts.upsert(&user.user_key, input.widgets).await;

    tracing::info!(
        user = %user.redacted(),
        widget_count = layout.widgets.len(),
        "Dashboard layout saved",
    );

    Ok(Json(layout))
}

/// POST /api/v1/users/dashboard-layout/reset
///
/// Replace the caller's layout with the default widget set.
pub async fn reset_layout(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let layout = state.layouts.reset(&user.user_key).await;

    tracing::info!(user = %user.redacted(), "Dashboard layout reset to defaults");

    Ok(Json(layout))
}
