//! LabourHub domain rules.
//!
//! Pure, IO-free building blocks shared by the `db` and `api` crates:
//!
//! - [`error`] -- the [`CoreError`](error::CoreError) taxonomy every layer
//!   maps onto HTTP statuses.
//! - [`roles`] -- well-known account role constants.
//! - [`profile`] -- profile field validation (phone, skills, availability).
//! - [`hiring`] -- job status constants and the transition rules.
//! - [`rating`] -- rating range checks and aggregate rounding.
//! - [`upload`] -- upload allow-list and content sniffing.

pub mod error;
pub mod hiring;
pub mod profile;
pub mod rating;
pub mod roles;
pub mod types;
pub mod upload;
