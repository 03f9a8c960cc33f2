//! Route definitions for the labour listing and ratings.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{labours, rating};
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// GET  /labours            -> list_labours
/// POST /rate/{labour_id}   -> rate_labour (customer only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/labours", get(labours::list_labours))
        .route("/rate/{labour_id}", post(rating::rate_labour))
}
