//! Bearer-token caller identification for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vitalboard_core::error::CoreError;

use crate::error::AppError;

/// Caller identified by the Bearer token in the `Authorization` header.
///
/// The token is treated as an opaque per-user key and is not verified here;
/// issuing and checking tokens belongs to the account service in front of
/// this API.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user = %user.redacted(), "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Opaque key that layouts are stored under.
    pub user_key: String,
}

impl AuthUser {
    /// Short form of the key that is safe to put in logs.
    pub fn redacted(&self) -> String {
        let prefix: String = self.user_key.chars().take(4).collect();
        format!("{prefix}…")
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Invalid Authorization format. Expected: Bearer <token>".into(),
                ))
            })?;

        Ok(AuthUser {
            user_key: token.to_string(),
        })
    }
}
