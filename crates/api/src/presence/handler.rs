use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use labourhub_core::types::DbId;
use serde::Deserialize;

use crate::presence::registry::PresenceRegistry;
use crate::state::AppState;

/// Messages a client may send over the live connection.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum ClientMessage {
    /// Bind this connection to a user so job events can be pushed to it.
    RegisterUser { user_id: DbId },
}

/// HTTP handler that upgrades the connection to WebSocket.
///
/// After the upgrade the connection is registered with `PresenceRegistry`
/// and managed by two tasks (sender + receiver).
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.presence))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `PresenceRegistry`.
///   2. Spawns a sender task that forwards messages from the registry channel.
///   3. Processes inbound messages on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, presence: Arc<PresenceRegistry>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "Live connection opened");

    // Register and get the receiver for outbound messages.
    let mut rx = presence.add(conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: process inbound messages.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::RegisterUser { user_id }) => {
                    let bound = presence.bind_user(&conn_id, user_id).await;
                    tracing::debug!(conn_id = %conn_id, user_id, bound, "register-user received");
                }
                Err(e) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring unparseable client message");
                }
            },
            Ok(_msg) => {
                // Binary and other frames carry no meaning on this connection.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection and abort sender task.
    presence.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "Live connection closed");
}
