//! Handler for the public contact form.

use axum::extract::State;
use axum::Json;
use labourhub_core::profile::{validate_text_field, MAX_NAME_LENGTH};
use labourhub_db::models::contact::CreateContact;
use labourhub_db::repositories::ContactRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::state::AppState;

/// Maximum length for a contact form message.
const MAX_MESSAGE_LENGTH: usize = 5_000;

/// Request body for `POST /api/contact`.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Response body for `POST /api/contact`.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
}

/// POST /api/contact
///
/// Persist a message from the public contact form. No authentication.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactRequest>,
) -> AppResult<Json<ContactResponse>> {
    validate_text_field("name", &input.name, MAX_NAME_LENGTH)?;
    validate_text_field("email", &input.email, MAX_NAME_LENGTH)?;
    validate_text_field("message", &input.message, MAX_MESSAGE_LENGTH)?;

    let record = CreateContact {
        name: input.name,
        email: input.email,
        message: input.message,
    };
    ContactRepo::create(&state.pool, &record).await?;

    Ok(Json(ContactResponse {
        message: "Message sent".into(),
    }))
}
