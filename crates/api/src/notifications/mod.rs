//! Notification routing infrastructure.
//!
//! The [`NotificationRouter`] subscribes to the event bus and forwards each
//! job event to the affected user's live connection, if one exists.

pub mod router;

pub use router::NotificationRouter;
