//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`MarketEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use labourhub_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A customer created a hire request addressed to a labour.
pub const EVENT_JOB_CREATED: &str = "job.created";

/// A labour accepted or rejected a hire request.
pub const EVENT_JOB_STATUS_UPDATED: &str = "job.status_updated";

// ---------------------------------------------------------------------------
// MarketEvent
// ---------------------------------------------------------------------------

/// A domain event that occurred on the marketplace.
///
/// Constructed via [`MarketEvent::new`] and enriched with the builder
/// methods [`with_job`](MarketEvent::with_job),
/// [`with_actor`](MarketEvent::with_actor),
/// [`with_target`](MarketEvent::with_target), and
/// [`with_payload`](MarketEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Dot-separated event name, e.g. `"job.created"`.
    pub event_type: String,

    /// The job this event concerns, if any.
    pub job_id: Option<DbId>,

    /// Id of the user that triggered the event.
    pub actor_user_id: Option<DbId>,

    /// Id of the user the event should be delivered to.
    pub target_user_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl MarketEvent {
    /// Create a new event with only the required `event_type`.
    ///
    /// All optional fields default to `None` / empty object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            job_id: None,
            actor_user_id: None,
            target_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the job the event concerns.
    pub fn with_job(mut self, job_id: DbId) -> Self {
        self.job_id = Some(job_id);
        self
    }

    /// Attach the acting user to the event.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Attach the user the event is addressed to.
    pub fn with_target(mut self, user_id: DbId) -> Self {
        self.target_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`MarketEvent`].
///
/// # Usage
///
/// ```rust
/// use labourhub_events::bus::{EventBus, MarketEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(MarketEvent::new("job.created"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<MarketEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// live notifications are best-effort and the database rows stay
    /// authoritative.
    pub fn publish(&self, event: MarketEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
