//! LabourHub in-process event bus.
//!
//! - [`EventBus`] -- publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`MarketEvent`] -- the canonical domain event envelope.
//!
//! Delivery is deliberately best-effort: events carried on the bus exist
//! only to drive live notifications, and the persisted rows remain the
//! source of truth for all of them.

pub mod bus;

pub use bus::{EventBus, MarketEvent, EVENT_JOB_CREATED, EVENT_JOB_STATUS_UPDATED};
