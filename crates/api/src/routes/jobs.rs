//! Route definitions for hire requests and the job lifecycle.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{hire, jobs};
use crate::state::AppState;

/// Routes mounted under `/api`.
///
/// ```text
/// POST /hire/{labour_id}  -> create_hire (customer only)
/// GET  /jobs              -> list_jobs (labour only)
/// PUT  /jobs/{id}         -> set_job_status (labour only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hire/{labour_id}", post(hire::create_hire))
        .route("/jobs", get(jobs::list_jobs))
        .route("/jobs/{id}", put(jobs::set_job_status))
}
