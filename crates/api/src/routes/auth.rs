//! Route definitions for the browser-facing auth forms.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the site root.
///
/// ```text
/// POST /register  -> register (multipart, public)
/// POST /login     -> login (form, public)
/// GET  /logout    -> logout (requires session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
}
