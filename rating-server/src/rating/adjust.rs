//! Preference-sensitive travel-time adjustment.
//!
//! The adjustment works like progressive tax brackets: each band of the raw
//! time contributes at its own marginal rate, and time beyond the last band
//! contributes nothing. High preference subtracts the adjustment, low
//! preference adds it, medium leaves the time alone.

use crate::domain::PreferenceLevel;

use super::error::RatingError;

/// `(lower bound, upper bound, marginal rate)` in seconds.
pub const BRACKETS: [(f64, f64, f64); 3] = [
    (0.0, 300.0, 0.7),
    (300.0, 720.0, 0.5),
    (720.0, 1500.0, 0.25),
];

/// Cumulative bracket adjustment for a raw travel time.
pub fn bracket_offset(time_seconds: f64) -> f64 {
    BRACKETS
        .iter()
        .map(|&(lower, upper, rate)| rate * (time_seconds - lower).clamp(0.0, upper - lower))
        .sum()
}

/// Adjust a travel time for the searcher's preference for that mode.
///
/// `None` is rejected: modes without a preference are filtered out before
/// any time reaches this function.
pub fn adjust(time_seconds: f64, level: PreferenceLevel) -> Result<f64, RatingError> {
    match level {
        PreferenceLevel::Medium => Ok(time_seconds),
        PreferenceLevel::High => Ok(time_seconds - bracket_offset(time_seconds)),
        PreferenceLevel::Low => Ok(time_seconds + bracket_offset(time_seconds)),
        PreferenceLevel::None => Err(RatingError::InvalidPreference(level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn medium_is_identity() {
        assert_eq!(adjust(437.0, PreferenceLevel::Medium).unwrap(), 437.0);
    }

    #[test]
    fn brackets_compose() {
        let expected = 2000.0 - (0.7 * 300.0 + 0.5 * 420.0 + 0.25 * 780.0);
        assert!(approx(adjust(2000.0, PreferenceLevel::High).unwrap(), expected));

        let expected = 2000.0 + (0.7 * 300.0 + 0.5 * 420.0 + 0.25 * 780.0);
        assert!(approx(adjust(2000.0, PreferenceLevel::Low).unwrap(), expected));
    }

    #[test]
    fn first_bracket_only() {
        assert!(approx(bracket_offset(100.0), 70.0));
        assert!(approx(bracket_offset(300.0), 210.0));
        assert!(approx(bracket_offset(400.0), 260.0));
    }

    #[test]
    fn saturates_after_last_bracket() {
        assert!(approx(bracket_offset(1500.0), bracket_offset(9000.0)));
    }

    #[test]
    fn none_is_rejected() {
        assert!(matches!(
            adjust(60.0, PreferenceLevel::None),
            Err(RatingError::InvalidPreference(PreferenceLevel::None))
        ));
    }
}
