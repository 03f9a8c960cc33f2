//! Contact form message model and DTOs.

use labourhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `contact_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: Timestamp,
}

/// DTO for persisting a contact form submission.
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub message: String,
}
