//! Handler for customer ratings of labour accounts.

use axum::extract::{Path, State};
use axum::Json;
use labourhub_core::error::CoreError;
use labourhub_core::rating::validate_rating;
use labourhub_core::roles::ROLE_LABOUR;
use labourhub_core::types::DbId;
use labourhub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCustomer;
use crate::state::AppState;

/// Request body for `POST /api/rate/{labour_id}`.
#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: i16,
}

/// Response body for `POST /api/rate/{labour_id}`.
#[derive(Debug, Serialize)]
pub struct RatingResponse {
    pub message: String,
    /// The labour's new aggregate rating, rounded to one decimal.
    pub rating: f64,
}

/// POST /api/rate/{labour_id}
///
/// Record a 1-5 rating for a labour and return the recomputed aggregate.
/// The range check runs before any lookup or write, so an out-of-range
/// score leaves the stored aggregate untouched.
pub async fn rate_labour(
    RequireCustomer(auth): RequireCustomer,
    State(state): State<AppState>,
    Path(labour_id): Path<DbId>,
    Json(input): Json<RateRequest>,
) -> AppResult<Json<RatingResponse>> {
    validate_rating(input.rating)?;

    let labour = UserRepo::find_by_id(&state.pool, labour_id)
        .await?
        .filter(|user| user.role == ROLE_LABOUR)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Labour",
            id: labour_id,
        }))?;

    let rating = UserRepo::add_rating(&state.pool, labour.id, input.rating, auth.user_id).await?;
    tracing::info!(
        labour_id,
        rating = input.rating,
        rated_by = auth.user_id,
        "Rating submitted"
    );

    Ok(Json(RatingResponse {
        message: "Rating submitted".into(),
        rating,
    }))
}
