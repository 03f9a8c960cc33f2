//! Route definitions for the public contact form.

use axum::routing::post;
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// POST /contact  -> submit_contact (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/contact", post(contact::submit_contact))
}
