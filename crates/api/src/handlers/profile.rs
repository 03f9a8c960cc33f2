//! Handlers for the authenticated user's own profile.

use axum::extract::{Multipart, State};
use axum::Json;
use labourhub_core::error::CoreError;
use labourhub_core::profile::{
    parse_skills, validate_availability, validate_phone, validate_text_field,
    MAX_CITY_LENGTH, MAX_EXPERIENCE_LENGTH, MAX_NAME_LENGTH,
};
use labourhub_db::models::user::{UpdateProfile, UserResponse};
use labourhub_db::repositories::UserRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::uploads::store_upload;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response body for `GET /api/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub role: String,
}

/// Response body for `PUT /api/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(ProfileResponse {
        user: user.into(),
        role: auth.role,
    }))
}

/// PUT /api/profile
///
/// Multipart partial update. Accepted fields: name, phone, city, skills,
/// experience, availability, and an optional `image` file. Empty fields are
/// skipped; present-but-invalid values fail with 400 before anything is
/// written. A request carrying no usable field at all is rejected.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<Json<ProfileUpdateResponse>> {
    let mut update = UpdateProfile::default();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => {
                if let Some(value) = read_optional_text(field).await? {
                    validate_text_field("name", &value, MAX_NAME_LENGTH)?;
                    update.name = Some(value);
                }
            }
            "phone" => {
                if let Some(value) = read_optional_text(field).await? {
                    validate_phone(&value)?;
                    update.phone = Some(value);
                }
            }
            "city" => {
                if let Some(value) = read_optional_text(field).await? {
                    validate_text_field("city", &value, MAX_CITY_LENGTH)?;
                    update.city = Some(value);
                }
            }
            "skills" => {
                if let Some(value) = read_optional_text(field).await? {
                    update.skills = Some(parse_skills(&value)?);
                }
            }
            "experience" => {
                if let Some(value) = read_optional_text(field).await? {
                    validate_text_field("experience", &value, MAX_EXPERIENCE_LENGTH)?;
                    update.experience = Some(value);
                }
            }
            "availability" => {
                if let Some(value) = read_optional_text(field).await? {
                    validate_availability(&value)?;
                    update.availability = Some(value);
                }
            }
            "image" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !data.is_empty() {
                    image = Some((content_type, data.to_vec()));
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    if let Some((content_type, bytes)) = image {
        update.image = Some(store_upload(&state.config.upload_dir, &content_type, &bytes).await?);
    }

    if update.is_empty() {
        return Err(AppError::BadRequest(
            "No valid fields provided to update".into(),
        ));
    }

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    tracing::info!(user_id = auth.user_id, "Profile updated");

    Ok(Json(ProfileUpdateResponse {
        message: "Profile updated".into(),
        user: user.into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a text field, mapping blank input to `None`.
async fn read_optional_text(
    field: axum::extract::multipart::Field<'_>,
) -> AppResult<Option<String>> {
    let value = field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
