//! Live-connection presence registry for real-time push notifications.
//!
//! Provides connection management, user binding, heartbeat monitoring, and
//! the HTTP upgrade handler used by Axum routes. Delivery through the
//! registry is strictly best-effort: events addressed to a user without a
//! live connection are dropped, and clients recover missed state by
//! re-fetching over HTTP.

mod handler;
mod heartbeat;
pub mod registry;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use registry::PresenceRegistry;
