//! Repository for the `users` and `labour_ratings` tables.

use labourhub_core::roles::ROLE_LABOUR;
use labourhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, UpdateProfile, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, city, role, password_hash, identity, \
                        valid_proof, image, skills, experience, availability, rating, \
                        created_at, updated_at";

/// Provides CRUD operations for users and their ratings.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, phone, city, role, password_hash, identity, valid_proof)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.city)
            .bind(&input.role)
            .bind(&input.password_hash)
            .bind(&input.identity)
            .bind(&input.valid_proof)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email and role.
    ///
    /// Email is unique per role, not globally, so the role is part of the key.
    pub async fn find_by_email_and_role(
        pool: &PgPool,
        email: &str,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1 AND role = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Find an existing account that would collide with a registration:
    /// same email or same phone within the same role.
    pub async fn find_duplicate(
        pool: &PgPool,
        email: &str,
        phone: &str,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE role = $3 AND (email = $1 OR phone = $2)"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(phone)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// List all labour accounts, newest first.
    pub async fn list_labours(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE role = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(ROLE_LABOUR)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial profile update. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_profile(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                city = COALESCE($4, city),
                skills = COALESCE($5, skills),
                experience = COALESCE($6, experience),
                availability = COALESCE($7, availability),
                image = COALESCE($8, image),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.city)
            .bind(&input.skills)
            .bind(&input.experience)
            .bind(&input.availability)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// Record a rating for a labour and recompute the stored aggregate.
    ///
    /// The insert and the aggregate recompute run in one transaction so the
    /// stored mean always reflects the full rating collection. Returns the
    /// new aggregate, rounded to one decimal by the database.
    pub async fn add_rating(
        pool: &PgPool,
        labour_id: DbId,
        rating: i16,
        rated_by: DbId,
    ) -> Result<f64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("INSERT INTO labour_ratings (labour_id, rating, rated_by) VALUES ($1, $2, $3)")
            .bind(labour_id)
            .bind(rating)
            .bind(rated_by)
            .execute(&mut *tx)
            .await?;

        let new_rating: f64 = sqlx::query_scalar(
            "UPDATE users SET
                rating = (SELECT round(avg(rating)::numeric, 1)::float8
                          FROM labour_ratings WHERE labour_id = $1),
                updated_at = now()
             WHERE id = $1
             RETURNING rating",
        )
        .bind(labour_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(new_rating)
    }
}
