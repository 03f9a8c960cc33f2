//! Route definitions for the session probe and own-profile resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{auth, profile};
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// GET /me       -> me
/// GET /profile  -> get_profile
/// PUT /profile  -> update_profile (multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(auth::me))
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
}
