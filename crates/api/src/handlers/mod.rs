//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod contact;
pub mod hire;
pub mod jobs;
pub mod labours;
pub mod profile;
pub mod rating;
mod uploads;
