//! Repository for the `contact_messages` table.

use sqlx::PgPool;

use crate::models::contact::{ContactMessage, CreateContact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, message, created_at";

/// Provides insert access for contact form submissions.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact message, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContact,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, message)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }
}
