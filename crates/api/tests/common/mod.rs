use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::routing::get;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use labourhub_api::auth::password::hash_password;
use labourhub_api::auth::session::{SessionConfig, SESSION_COOKIE};
use labourhub_api::config::ServerConfig;
use labourhub_api::notifications::NotificationRouter;
use labourhub_api::presence::{self, PresenceRegistry};
use labourhub_api::routes;
use labourhub_api::state::AppState;
use labourhub_db::models::user::{CreateUser, User};
use labourhub_db::repositories::UserRepo;

/// Plaintext password used for every user created by [`create_test_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5500` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a temp-dir upload directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5500".to_string()],
        request_timeout_secs: 30,
        upload_dir: std::env::temp_dir().join("labourhub-test-uploads"),
        session: SessionConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            ttl_hours: 24,
        },
    }
}

/// Build the shared application state over the given pool, with the
/// notification router running like it does in production.
///
/// Returned separately from the router so tests can reach the presence
/// registry and event bus directly.
pub fn build_test_state(pool: PgPool) -> AppState {
    let presence_registry = Arc::new(PresenceRegistry::new());
    let event_bus = Arc::new(labourhub_events::EventBus::default());

    let router = NotificationRouter::new(Arc::clone(&presence_registry));
    tokio::spawn(router.run(event_bus.subscribe()));

    AppState {
        pool,
        config: Arc::new(test_config()),
        presence: presence_registry,
        event_bus,
    }
}

/// Build the full application router over pre-built state.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_app_from_state(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5500".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::root_routes())
        .nest("/api", routes::api_routes())
        .route("/ws", get(presence::ws_handler))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Build the full application router with default test state.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_from_state(build_test_state(pool))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without credentials.
pub async fn get_path(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a GET request with a session cookie.
pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(COOKIE, cookie)
            .body(Body::empty())
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a JSON POST request without credentials.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a JSON POST request with a session cookie.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(COOKIE, cookie)
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a JSON PUT request with a session cookie.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .header(COOKIE, cookie)
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Send a form-encoded POST request (browser form submission).
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
    )
    .await
    .expect("request should not fail")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

/// Boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build a `multipart/form-data` body from text fields and an optional file.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (field_name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field_name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((field_name, filename, content_type, bytes)) = file {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a multipart request (POST or PUT) with an optional session cookie.
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    body: Vec<u8>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.oneshot(builder.body(Body::from(body)).expect("request should build"))
        .await
        .expect("request should not fail")
}

// ---------------------------------------------------------------------------
// User / session helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database, bypassing the registration form.
///
/// The password is always [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, name: &str, role: &str, phone: &str) -> User {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let input = CreateUser {
        name: name.to_string(),
        email: format!("{name}@test.com"),
        phone: phone.to_string(),
        city: "Pune".to_string(),
        role: role.to_string(),
        password_hash: hashed,
        identity: "AADHAAR-0001".to_string(),
        valid_proof: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log a user in through `POST /login` and return the `Cookie` header value
/// to attach to subsequent requests.
pub async fn login_and_get_cookie(app: Router, role: &str, email: &str) -> String {
    let body = format!("role={role}&email={email}&password={TEST_PASSWORD}");
    let response = post_form(app, "/login", &body).await;
    assert_eq!(
        response.status(),
        StatusCode::SEE_OTHER,
        "login should redirect"
    );

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login should set the session cookie")
        .to_str()
        .expect("cookie should be valid UTF-8");
    assert!(set_cookie.starts_with(SESSION_COOKIE));

    // Keep only the `name=value` pair for the Cookie request header.
    set_cookie
        .split(';')
        .next()
        .expect("cookie should have a value")
        .to_string()
}
