//! Handler for creating hire requests.

use axum::extract::{Path, State};
use axum::Json;
use labourhub_core::error::CoreError;
use labourhub_core::roles::ROLE_LABOUR;
use labourhub_core::types::DbId;
use labourhub_db::models::job::Job;
use labourhub_db::repositories::{JobRepo, UserRepo};
use labourhub_events::{MarketEvent, EVENT_JOB_CREATED};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireCustomer;
use crate::state::AppState;

/// Response body for `POST /api/hire/{labour_id}`.
#[derive(Debug, Serialize)]
pub struct HireResponse {
    pub message: String,
    pub job: Job,
}

/// POST /api/hire/{labour_id}
///
/// Create a pending hire request from the authenticated customer to the
/// given labour, then push a best-effort `new-job` notification to the
/// labour's live connection. The target is verified before the job row is
/// written so a bad id produces neither a row nor an event.
pub async fn create_hire(
    RequireCustomer(auth): RequireCustomer,
    State(state): State<AppState>,
    Path(labour_id): Path<DbId>,
) -> AppResult<Json<HireResponse>> {
    let labour = UserRepo::find_by_id(&state.pool, labour_id)
        .await?
        .filter(|user| user.role == ROLE_LABOUR)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Labour",
            id: labour_id,
        }))?;

    let job = JobRepo::create(&state.pool, auth.user_id, labour.id).await?;
    tracing::info!(
        job_id = job.id,
        customer_id = auth.user_id,
        labour_id,
        "Hire request created"
    );

    // The row is committed; the push is purely a UX optimization on top.
    let payload = serde_json::to_value(&job)
        .map_err(|e| AppError::InternalError(format!("Job serialization error: {e}")))?;
    state.event_bus.publish(
        MarketEvent::new(EVENT_JOB_CREATED)
            .with_job(job.id)
            .with_actor(auth.user_id)
            .with_target(labour.id)
            .with_payload(payload),
    );

    Ok(Json(HireResponse {
        message: "Hire request sent".into(),
        job,
    }))
}
