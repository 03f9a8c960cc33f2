use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use labourhub_core::types::{DbId, Timestamp};
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type PresenceSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single live connection.
pub struct PresenceConnection {
    /// The user this connection is registered to, once the client has sent
    /// its `register-user` message. `None` until then.
    pub user_id: Option<DbId>,
    /// Channel sender for outbound messages to this connection.
    pub sender: PresenceSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Process-wide registry of live connections.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application. Bounded by concurrently connected users —
/// a multi-instance deployment would need to externalize this map, which is
/// out of scope for the single-process server.
pub struct PresenceRegistry {
    connections: RwLock<HashMap<String, PresenceConnection>>,
}

impl PresenceRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new, not-yet-identified connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = PresenceConnection {
            user_id: None,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Bind a connection to a user identity.
    ///
    /// The last registration for a user wins: any other connection currently
    /// bound to the same user is unbound (no multi-device fan-out). Returns
    /// `false` when the connection id is unknown (already disconnected).
    pub async fn bind_user(&self, conn_id: &str, user_id: DbId) -> bool {
        let mut conns = self.connections.write().await;

        for (id, conn) in conns.iter_mut() {
            if id != conn_id && conn.user_id == Some(user_id) {
                conn.user_id = None;
            }
        }

        match conns.get_mut(conn_id) {
            Some(conn) => {
                conn.user_id = Some(user_id);
                true
            }
            None => false,
        }
    }

    /// Remove a connection by its ID.
    ///
    /// Disconnect events carry only the connection handle, so removal is
    /// keyed by it. Removing an unknown id is a no-op.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Send a message to the connection bound to a user, if any.
    ///
    /// Fire-and-forget: returns `false` when the user has no live bound
    /// connection, in which case the message is dropped. There is no queue,
    /// no retry, and no durability — persisted records remain the source of
    /// truth and clients re-fetch to recover missed events.
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> bool {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            if conn.user_id == Some(user_id) {
                return conn.sender.send(message).is_ok();
            }
        }
        false
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all live connections");
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
