//! Handlers for registration, login, logout, and the session probe.

use axum::extract::{Multipart, State};
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use labourhub_core::error::CoreError;
use labourhub_core::profile::{
    validate_phone, validate_text_field, MAX_CITY_LENGTH, MAX_NAME_LENGTH,
};
use labourhub_core::roles::{validate_role, ROLE_CUSTOMER, ROLE_LABOUR};
use labourhub_core::types::DbId;
use labourhub_db::models::session::CreateSession;
use labourhub_db::models::user::CreateUser;
use labourhub_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::auth::session::{clear_session_cookie, generate_session_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::handlers::uploads::store_upload;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Redirect target for every failed login attempt. Deliberately generic:
/// whether the email, role, or password was wrong is never revealed.
const LOGIN_FAILURE_REDIRECT: &str = "/login.html?err=Invalid%20credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Form body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub role: String,
    pub email: String,
    pub password: String,
}

/// Session identity echoed by `GET /api/me`.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: DbId,
    pub role: String,
    pub name: String,
}

/// Response body for `GET /api/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(rename = "loggedIn")]
    pub logged_in: bool,
    pub user: SessionUser,
}

/// Collected multipart fields of the registration form.
#[derive(Default)]
struct RegisterForm {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    city: Option<String>,
    password: Option<String>,
    role: Option<String>,
    identity: Option<String>,
    /// Declared content type and raw bytes of the `validProof` file field.
    proof: Option<(String, Vec<u8>)>,
}

/// Why a login attempt was turned away. Logged server-side only; the
/// browser always sees the same generic redirect.
#[derive(Debug)]
enum LoginFailure {
    UnknownAccount,
    RoleMismatch,
    WrongPassword,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /register
///
/// Multipart registration form: name, email, phone, city, password, role,
/// identity, and an optional `validProof` file (JPEG/PNG/PDF, max 2 MiB).
/// Success redirects to the login page.
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Redirect> {
    let mut form = RegisterForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "email" => form.email = Some(read_text(field).await?),
            "phone" => form.phone = Some(read_text(field).await?),
            "city" => form.city = Some(read_text(field).await?),
            "password" => form.password = Some(read_text(field).await?),
            "role" => form.role = Some(read_text(field).await?),
            "identity" => form.identity = Some(read_text(field).await?),
            "validProof" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.proof = Some((content_type, data.to_vec()));
            }
            _ => {} // ignore unknown fields
        }
    }

    // All validation happens before anything is written.
    let name = required(form.name, "name")?;
    let email = required(form.email, "email")?;
    let phone = required(form.phone, "phone")?;
    let city = required(form.city, "city")?;
    let password = required(form.password, "password")?;
    let role = required(form.role, "role")?;
    let identity = required(form.identity, "identity")?;

    validate_text_field("name", &name, MAX_NAME_LENGTH)?;
    validate_text_field("city", &city, MAX_CITY_LENGTH)?;
    validate_role(&role)?;
    validate_phone(&phone)?;
    validate_password_strength(&password, MIN_PASSWORD_LENGTH)
        .map_err(CoreError::Validation)?;

    if UserRepo::find_duplicate(&state.pool, &email, &phone, &role)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User already exists".into(),
        )));
    }

    let valid_proof = match &form.proof {
        Some((content_type, bytes)) => {
            Some(store_upload(&state.config.upload_dir, content_type, bytes).await?)
        }
        None => None,
    };

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        name,
        email,
        phone,
        city,
        role,
        password_hash,
        identity,
        valid_proof,
    };
    let user = UserRepo::create(&state.pool, &input).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    Ok(Redirect::to("/login.html"))
}

/// POST /login
///
/// Authenticate with role + email + password. Success installs the session
/// cookie and redirects to the role's dashboard; every failure redirects
/// with the same generic error.
pub async fn login(
    State(state): State<AppState>,
    Form(input): Form<LoginRequest>,
) -> AppResult<Response> {
    if validate_role(&input.role).is_err() {
        return Ok(login_failure(&input.email, LoginFailure::UnknownAccount));
    }

    // 1. Find the account for this email under the submitted role. Email is
    //    unique per role, so a miss here is either an unknown account or a
    //    role mismatch — distinguished below for the server-side log only.
    let user = match UserRepo::find_by_email_and_role(&state.pool, &input.email, &input.role)
        .await?
    {
        Some(user) => user,
        None => {
            let other_role = if input.role == ROLE_CUSTOMER {
                ROLE_LABOUR
            } else {
                ROLE_CUSTOMER
            };
            let failure = if UserRepo::find_by_email_and_role(&state.pool, &input.email, other_role)
                .await?
                .is_some()
            {
                LoginFailure::RoleMismatch
            } else {
                LoginFailure::UnknownAccount
            };
            return Ok(login_failure(&input.email, failure));
        }
    };

    // 2. Verify the password against the stored Argon2id hash.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Ok(login_failure(&input.email, LoginFailure::WrongPassword));
    }

    // 3. Issue the session token and persist the session row.
    let issued = generate_session_token(user.id, &user.role, &user.name, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let session_input = CreateSession {
        user_id: user.id,
        token_hash: issued.token_hash,
        expires_at: issued.expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;
    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    // 4. Install the cookie and send the browser to its dashboard.
    let target = if user.role == ROLE_CUSTOMER {
        "/dashboard.html"
    } else {
        "/dashboards.html"
    };
    let headers = [(SET_COOKIE, session_cookie(&issued.token, &state.config.session))];
    Ok((headers, Redirect::to(target)).into_response())
}

/// GET /logout
///
/// Revoke all sessions for the authenticated user, clear the cookie, and
/// redirect to the login page.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<Response> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "User logged out");

    let headers = [(SET_COOKIE, clear_session_cookie())];
    Ok((headers, Redirect::to("/login.html")).into_response())
}

/// GET /api/me
///
/// Report the identity bound to the current session. Requests without a
/// valid session are rejected by the extractor with 401.
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        logged_in: true,
        user: SessionUser {
            id: auth.user_id,
            role: auth.role,
            name: auth.name,
        },
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a text field from the multipart stream.
async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Unwrap a required registration field or fail with a validation error.
fn required(value: Option<String>, field: &str) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(CoreError::Validation(format!(
            "Missing required field '{field}'"
        ))),
    }
}

/// Log the real failure reason and build the generic failure redirect.
fn login_failure(email: &str, failure: LoginFailure) -> Response {
    tracing::debug!(email, reason = ?failure, "Login rejected");
    Redirect::to(LOGIN_FAILURE_REDIRECT).into_response()
}
