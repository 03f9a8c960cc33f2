//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use labourhub_core::error::CoreError;
use labourhub_core::roles::{ROLE_CUSTOMER, ROLE_LABOUR};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `customer` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn customer_only(RequireCustomer(user): RequireCustomer) -> AppResult<Json<()>> {
///     // user is guaranteed to be a customer here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireCustomer(pub AuthUser);

impl FromRequestParts<AppState> for RequireCustomer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_CUSTOMER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Customer role required".into(),
            )));
        }
        Ok(RequireCustomer(user))
    }
}

/// Requires the `labour` role. Rejects with 403 Forbidden otherwise.
pub struct RequireLabour(pub AuthUser);

impl FromRequestParts<AppState> for RequireLabour {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_LABOUR {
            return Err(AppError::Core(CoreError::Forbidden(
                "Labour role required".into(),
            )));
        }
        Ok(RequireLabour(user))
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
