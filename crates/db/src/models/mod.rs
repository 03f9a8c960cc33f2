//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where partial updates exist

pub mod contact;
pub mod job;
pub mod session;
pub mod user;
