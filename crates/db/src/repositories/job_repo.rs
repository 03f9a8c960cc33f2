//! Repository for the `jobs` table.

use labourhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::{Job, JobWithCustomer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_id, labour_id, title, description, location, status, \
                        created_at, updated_at";

/// Provides CRUD operations for hire requests.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new pending hire request, returning the created row.
    ///
    /// Title, description, and status take their column defaults.
    pub async fn create(
        pool: &PgPool,
        customer_id: DbId,
        labour_id: DbId,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (customer_id, labour_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(customer_id)
            .bind(labour_id)
            .fetch_one(pool)
            .await
    }

    /// Find a job by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all jobs addressed to a labour, newest first, with the
    /// customer's contact details joined in.
    pub async fn list_for_labour(
        pool: &PgPool,
        labour_id: DbId,
    ) -> Result<Vec<JobWithCustomer>, sqlx::Error> {
        sqlx::query_as::<_, JobWithCustomer>(
            "SELECT j.id, j.customer_id, j.labour_id, j.title, j.description, j.location,
                    j.status, j.created_at, j.updated_at,
                    u.name AS customer_name, u.phone AS customer_phone, u.city AS customer_city
             FROM jobs j
             JOIN users u ON u.id = j.customer_id
             WHERE j.labour_id = $1
             ORDER BY j.created_at DESC",
        )
        .bind(labour_id)
        .fetch_all(pool)
        .await
    }

    /// Atomically transition a job out of `pending`.
    ///
    /// The status is only written when the row is still `pending`, so of two
    /// racing updates exactly one succeeds; the loser observes `None` and
    /// must re-read the row to report the terminal state it lost to.
    pub async fn set_status_if_pending(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET status = $2, updated_at = now()
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
