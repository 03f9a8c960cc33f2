//! Signed session tokens and the http-only session cookie.
//!
//! A login issues an HS256-signed token containing a [`SessionClaims`]
//! payload, delivered to the browser as the `labourhub_sid` http-only
//! cookie. Only the SHA-256 hash of the token's `jti` is stored server-side
//! so a database leak does not yield usable cookies.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use labourhub_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "labourhub_sid";

/// Claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's role name (`"customer"` or `"labour"`).
    pub role: String,
    /// The user's display name, echoed by `/api/me`.
    pub name: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4); its hash keys the session row.
    pub jti: String,
}

/// Configuration for session token generation and validation.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Session lifetime in hours (default: 24).
    pub ttl_hours: i64,
}

/// Default session lifetime in hours.
const DEFAULT_TTL_HOURS: i64 = 24;

impl SessionConfig {
    /// Load session configuration from environment variables.
    ///
    /// | Env Var             | Required | Default |
    /// |---------------------|----------|---------|
    /// | `SESSION_SECRET`    | **yes**  | --      |
    /// | `SESSION_TTL_HOURS` | no       | `24`    |
    ///
    /// # Panics
    ///
    /// Panics if `SESSION_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "SESSION_SECRET must not be empty");

        let ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");

        Self { secret, ttl_hours }
    }
}

/// A freshly issued session token plus the server-side bookkeeping values.
pub struct IssuedSession {
    /// The signed token to place in the session cookie.
    pub token: String,
    /// SHA-256 hex digest of the token's `jti`, for the `user_sessions` row.
    pub token_hash: String,
    /// When the session expires.
    pub expires_at: Timestamp,
}

/// Generate an HS256 session token for the given user.
pub fn generate_session_token(
    user_id: DbId,
    role: &str,
    name: &str,
    config: &SessionConfig,
) -> Result<IssuedSession, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::hours(config.ttl_hours);
    let jti = Uuid::new_v4().to_string();

    let claims = SessionClaims {
        sub: user_id,
        role: role.to_string(),
        name: name.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
        jti: jti.clone(),
    };

    let token = encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(IssuedSession {
        token,
        token_hash: hash_token_id(&jti),
        expires_at,
    })
}

/// Validate and decode a session token, returning the embedded [`SessionClaims`].
///
/// Validates the signature and expiration automatically.
pub fn validate_session_token(
    token: &str,
    config: &SessionConfig,
) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
    let token_data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Compute the SHA-256 hex digest of a session token id.
///
/// Use this to compare an incoming token's `jti` against the stored hash.
pub fn hash_token_id(jti: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(jti.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Build the `Set-Cookie` value that installs the session cookie.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    let max_age = config.ttl_hours * 60 * 60;
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
}

/// Build the `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
