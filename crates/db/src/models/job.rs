//! Job (hire request) entity model and DTOs.

use labourhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub customer_id: DbId,
    pub labour_id: DbId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    /// `pending`, `accepted`, or `rejected`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A job row joined with the referencing customer's contact details.
///
/// Returned by the labour-facing job list so workers can reach the customer
/// without a second lookup.
#[derive(Debug, Clone, FromRow)]
pub struct JobWithCustomer {
    pub id: DbId,
    pub customer_id: DbId,
    pub labour_id: DbId,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_city: String,
}
