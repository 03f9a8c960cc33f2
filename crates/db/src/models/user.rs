//! User entity model and DTOs.

use labourhub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    /// `customer` or `labour`. Immutable after registration.
    pub role: String,
    pub password_hash: String,
    /// Identity document number supplied at registration.
    pub identity: String,
    /// Relative path of the uploaded identity proof, if any.
    pub valid_proof: Option<String>,
    /// Relative path of the profile image, if any.
    pub image: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub availability: String,
    /// Mean of all submitted ratings, rounded to one decimal. 0 when unrated.
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub role: String,
    pub image: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub availability: String,
    pub rating: f64,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            city: user.city,
            role: user.role,
            image: user.image,
            skills: user.skills,
            experience: user.experience,
            availability: user.availability,
            rating: user.rating,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user at registration.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub role: String,
    pub password_hash: String,
    pub identity: String,
    pub valid_proof: Option<String>,
}

/// DTO for partial profile updates. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<String>,
    pub availability: Option<String>,
    pub image: Option<String>,
}

impl UpdateProfile {
    /// Whether the update carries at least one field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.city.is_none()
            && self.skills.is_none()
            && self.experience.is_none()
            && self.availability.is_none()
            && self.image.is_none()
    }
}
