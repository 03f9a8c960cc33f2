pub mod auth;
pub mod contact;
pub mod health;
pub mod jobs;
pub mod labours;
pub mod profile;

use axum::Router;

use crate::state::AppState;

/// Build the browser-form routes mounted at the site root.
///
/// ```text
/// POST /register   -> register (multipart, public)
/// POST /login      -> login (form, public)
/// GET  /logout     -> logout (requires session)
/// ```
pub fn root_routes() -> Router<AppState> {
    auth::router()
}

/// Build the `/api` route tree.
///
/// ```text
/// /me                   session probe
/// /profile              get, update own profile
/// /labours              labour listing
/// /rate/{labour_id}     rate a labour (customer only)
/// /hire/{labour_id}     create hire request (customer only)
/// /jobs                 list own hire requests (labour only)
/// /jobs/{id}            accept/reject (labour only)
/// /contact              contact form (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(profile::router())
        .merge(labours::router())
        .merge(jobs::router())
        .merge(contact::router())
}
