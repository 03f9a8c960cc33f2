//! Domain error taxonomy.
//!
//! Every fallible domain operation returns [`CoreError`]; the API layer maps
//! each variant onto an HTTP status without inspecting message contents.

use crate::types::DbId;

/// Domain-level error shared across all crates.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A field failed validation before any state was mutated.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request conflicts with current state (duplicate registration,
    /// terminal job status).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No valid session accompanied the request.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The session is valid but lacks the required role or ownership.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// An unexpected internal failure. The message is logged, never sent
    /// to clients verbatim.
    #[error("Internal error: {0}")]
    Internal(String),
}
