//! Profile field validation.
//!
//! Shared by registration and profile editing so both paths enforce the
//! same rules before anything touches the database.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length for a user's display name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for a city name.
pub const MAX_CITY_LENGTH: usize = 100;

/// Maximum length for the free-text experience field.
pub const MAX_EXPERIENCE_LENGTH: usize = 2_000;

/// Maximum number of skills on a single profile.
pub const MAX_SKILLS: usize = 20;

/// Worker is currently taking jobs.
pub const AVAILABILITY_AVAILABLE: &str = "available";

/// Worker is not taking jobs.
pub const AVAILABILITY_NOT_AVAILABLE: &str = "not-available";

/// All valid availability values.
pub const VALID_AVAILABILITIES: &[&str] =
    &[AVAILABILITY_AVAILABLE, AVAILABILITY_NOT_AVAILABLE];

/// Indian mobile numbers: 10 digits, first digit 6-9.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid regex"));

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a required text field is present and within `max` characters.
pub fn validate_text_field(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if value.len() > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

/// Validate a phone number against the 10-digit mobile pattern.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid phone number '{phone}'. Expected a 10-digit mobile number"
        )))
    }
}

/// Validate that an availability string is one of the accepted values.
pub fn validate_availability(availability: &str) -> Result<(), CoreError> {
    if VALID_AVAILABILITIES.contains(&availability) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid availability '{availability}'. Must be one of: {}",
            VALID_AVAILABILITIES.join(", ")
        )))
    }
}

/// Parse a comma-separated skills string into a trimmed, non-empty list.
pub fn parse_skills(raw: &str) -> Result<Vec<String>, CoreError> {
    let skills: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if skills.len() > MAX_SKILLS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_SKILLS} skills are allowed"
        )));
    }

    Ok(skills)
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
