//! Job status constants and transition rules.
//!
//! A job starts as `pending` and is moved exactly once, by the labour it
//! references, to either `accepted` or `rejected`. Both are terminal.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Hire request awaiting the labour's decision.
pub const JOB_STATUS_PENDING: &str = "pending";

/// Labour accepted the hire request. Terminal.
pub const JOB_STATUS_ACCEPTED: &str = "accepted";

/// Labour rejected the hire request. Terminal.
pub const JOB_STATUS_REJECTED: &str = "rejected";

/// All valid job status values.
pub const VALID_JOB_STATUSES: &[&str] =
    &[JOB_STATUS_PENDING, JOB_STATUS_ACCEPTED, JOB_STATUS_REJECTED];

/// Title given to hire requests created without an explicit title.
pub const DEFAULT_JOB_TITLE: &str = "Hiring Request";

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a status string is one of the accepted values.
pub fn validate_job_status(status: &str) -> Result<(), CoreError> {
    if VALID_JOB_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid job status '{status}'. Must be one of: {}",
            VALID_JOB_STATUSES.join(", ")
        )))
    }
}

/// Whether a status admits no further transitions.
pub fn is_terminal_status(status: &str) -> bool {
    status == JOB_STATUS_ACCEPTED || status == JOB_STATUS_REJECTED
}

/// Validate a requested status transition.
///
/// The requested status must itself be a terminal status (a job can never be
/// moved back to `pending`), and the current status must still be `pending`.
pub fn validate_status_transition(current: &str, requested: &str) -> Result<(), CoreError> {
    validate_job_status(requested)?;

    if !is_terminal_status(requested) {
        return Err(CoreError::Validation(format!(
            "Cannot set job status to '{requested}'. Must be '{JOB_STATUS_ACCEPTED}' or '{JOB_STATUS_REJECTED}'"
        )));
    }

    if current != JOB_STATUS_PENDING {
        return Err(CoreError::Conflict(format!(
            "Job status is already '{current}' and cannot be changed"
        )));
    }

    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
