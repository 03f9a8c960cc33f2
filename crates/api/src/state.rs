use std::sync::Arc;

use crate::config::ServerConfig;
use crate::presence::PresenceRegistry;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: labourhub_db::DbPool,
    /// Server configuration (bind address, CORS, session signing).
    pub config: Arc<ServerConfig>,
    /// Live-connection registry for best-effort push notifications.
    pub presence: Arc<PresenceRegistry>,
    /// Centralized event bus for publishing marketplace events.
    pub event_bus: Arc<labourhub_events::EventBus>,
}
