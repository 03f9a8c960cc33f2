//! Rating range checks and aggregate rounding.

use crate::error::CoreError;

/// Lowest accepted rating score.
pub const MIN_RATING: i16 = 1;

/// Highest accepted rating score.
pub const MAX_RATING: i16 = 5;

/// Validate that a rating score lies in the closed range `[1, 5]`.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Invalid rating {rating}. Must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

/// Round a rating mean to one decimal place.
pub fn round_rating(mean: f64) -> f64 {
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratings_in_range_accepted() {
        for r in MIN_RATING..=MAX_RATING {
            assert!(validate_rating(r).is_ok(), "{r} should be accepted");
        }
    }

    #[test]
    fn test_ratings_out_of_range_rejected() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }

    #[test]
    fn test_round_rating_one_decimal() {
        // Mean of [4, 5, 3] is exactly 4.0.
        assert_eq!(round_rating(12.0 / 3.0), 4.0);
        // Mean of [4, 5] is 4.5.
        assert_eq!(round_rating(9.0 / 2.0), 4.5);
        // Mean of [5, 4, 4] is 4.333... -> 4.3.
        assert_eq!(round_rating(13.0 / 3.0), 4.3);
        // Mean of [5, 5, 4] is 4.666... -> 4.7.
        assert_eq!(round_rating(14.0 / 3.0), 4.7);
    }
}
