//! Well-known account role constants.
//!
//! A user's role is fixed at registration and never changes afterwards.

use crate::error::CoreError;

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_LABOUR: &str = "labour";

/// All valid role values.
pub const VALID_ROLES: &[&str] = &[ROLE_CUSTOMER, ROLE_LABOUR];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), CoreError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}
