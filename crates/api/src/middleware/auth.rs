//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use labourhub_core::error::CoreError;
use labourhub_core::types::DbId;

use crate::auth::session::{validate_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's role name (`"customer"` or `"labour"`).
    pub role: String,
    /// The user's display name at login time.
    pub name: String,
}

/// Pull the session token out of the request.
///
/// The `labourhub_sid` cookie is the primary carrier; an `Authorization:
/// Bearer` header is accepted as a fallback for non-browser clients.
fn session_token(parts: &Parts) -> Option<String> {
    if let Some(cookies) = parts
        .headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
    {
        for pair in cookies.split(';') {
            if let Some((cookie_name, value)) = pair.trim().split_once('=') {
                if cookie_name == SESSION_COOKIE && !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Not logged in".into()))
        })?;

        let claims = validate_session_token(&token, &state.config.session).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
            name: claims.name,
        })
    }
}
