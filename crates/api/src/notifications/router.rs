//! Event-to-notification routing.
//!
//! [`NotificationRouter`] subscribes to the marketplace event bus and pushes
//! each event to its target user over the presence registry. Delivery is
//! best-effort with no queueing: an event addressed to a user without a live
//! connection is dropped, and the persisted Job row remains the source of
//! truth the client can re-fetch.

use std::sync::Arc;

use axum::extract::ws::Message;
use labourhub_events::{MarketEvent, EVENT_JOB_CREATED, EVENT_JOB_STATUS_UPDATED};
use tokio::sync::broadcast;

use crate::presence::PresenceRegistry;

/// Wire-level event name sent to the labour when a hire request is created.
const WIRE_NEW_JOB: &str = "new-job";

/// Wire-level event name sent to the customer when a job status changes.
const WIRE_JOB_STATUS_UPDATED: &str = "job-status-updated";

/// Routes marketplace events to user notifications.
pub struct NotificationRouter {
    presence: Arc<PresenceRegistry>,
}

impl NotificationRouter {
    /// Create a new router over the given presence registry.
    pub fn new(presence: Arc<PresenceRegistry>) -> Self {
        Self { presence }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](labourhub_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<MarketEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.route_event(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver a single event to its target user's live connection.
    async fn route_event(&self, event: &MarketEvent) {
        let Some(target) = event.target_user_id else {
            tracing::debug!(event_type = %event.event_type, "Event has no target user, skipping");
            return;
        };

        let Some(wire_type) = wire_event_name(&event.event_type) else {
            tracing::warn!(event_type = %event.event_type, "Unknown event type, skipping notification");
            return;
        };

        let msg = serde_json::json!({
            "type": wire_type,
            "job": event.payload,
        });
        let delivered = self
            .presence
            .send_to_user(target, Message::Text(msg.to_string().into()))
            .await;

        if delivered {
            tracing::debug!(user_id = target, event_type = %event.event_type, "Notification delivered");
        } else {
            // Deliberate at-most-once policy: the user is offline and the
            // event is dropped. The client re-fetches on its next load.
            tracing::debug!(user_id = target, event_type = %event.event_type, "Target offline, notification dropped");
        }
    }
}

/// Map a bus event type onto the wire-level event name clients listen for.
fn wire_event_name(event_type: &str) -> Option<&'static str> {
    match event_type {
        EVENT_JOB_CREATED => Some(WIRE_NEW_JOB),
        EVENT_JOB_STATUS_UPDATED => Some(WIRE_JOB_STATUS_UPDATED),
        _ => None,
    }
}
