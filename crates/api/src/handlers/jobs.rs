//! Handlers for the labour-facing job list and status updates.

use axum::extract::{Path, State};
use axum::Json;
use labourhub_core::error::CoreError;
use labourhub_core::hiring::validate_status_transition;
use labourhub_core::types::{DbId, Timestamp};
use labourhub_db::models::job::{Job, JobWithCustomer};
use labourhub_db::repositories::JobRepo;
use labourhub_events::{MarketEvent, EVENT_JOB_STATUS_UPDATED};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireLabour;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// The customer's contact details embedded in a job list entry.
#[derive(Debug, Serialize)]
pub struct CustomerContact {
    pub name: String,
    pub phone: String,
    pub city: String,
}

/// One entry in the labour's job list: the job plus its customer.
#[derive(Debug, Serialize)]
pub struct JobListEntry {
    pub id: DbId,
    pub customer_id: DbId,
    pub labour_id: DbId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub customer: CustomerContact,
}

impl From<JobWithCustomer> for JobListEntry {
    fn from(job: JobWithCustomer) -> Self {
        Self {
            id: job.id,
            customer_id: job.customer_id,
            labour_id: job.labour_id,
            title: job.title,
            description: job.description,
            location: job.location,
            status: job.status,
            created_at: job.created_at,
            updated_at: job.updated_at,
            customer: CustomerContact {
                name: job.customer_name,
                phone: job.customer_phone,
                city: job.customer_city,
            },
        }
    }
}

/// Request body for `PUT /api/jobs/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateJobStatus {
    pub status: String,
}

/// Response body for `PUT /api/jobs/{id}`.
#[derive(Debug, Serialize)]
pub struct JobStatusResponse {
    pub job: Job,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/jobs
///
/// List all hire requests addressed to the authenticated labour, newest
/// first, with the requesting customer's contact details embedded.
pub async fn list_jobs(
    RequireLabour(auth): RequireLabour,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<JobListEntry>>> {
    let jobs = JobRepo::list_for_labour(&state.pool, auth.user_id).await?;
    Ok(Json(jobs.into_iter().map(JobListEntry::from).collect()))
}

/// PUT /api/jobs/{id}
///
/// Accept or reject a pending hire request. Only the labour the job is
/// addressed to may transition it, and only out of `pending`. The write is
/// a conditional update, so of two racing transitions exactly one wins and
/// the loser observes a conflict. On success a best-effort
/// `job-status-updated` notification is pushed to the customer.
pub async fn set_job_status(
    RequireLabour(auth): RequireLabour,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateJobStatus>,
) -> AppResult<Json<JobStatusResponse>> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id,
        }))?;

    // Ownership check on top of the role gate: the caller must be the
    // labour this job is addressed to.
    if job.labour_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the requested labour can update this job".into(),
        )));
    }

    validate_status_transition(&job.status, &input.status)?;

    // The pre-check above can race with another request; the conditional
    // update is what actually decides the winner.
    let updated = JobRepo::set_status_if_pending(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Job status was already finalized by another request".into(),
            ))
        })?;
    tracing::info!(job_id = id, status = %updated.status, "Job status updated");

    let payload = serde_json::to_value(&updated)
        .map_err(|e| AppError::InternalError(format!("Job serialization error: {e}")))?;
    state.event_bus.publish(
        MarketEvent::new(EVENT_JOB_STATUS_UPDATED)
            .with_job(updated.id)
            .with_actor(auth.user_id)
            .with_target(updated.customer_id)
            .with_payload(payload),
    );

    Ok(Json(JobStatusResponse { job: updated }))
}
