//! Location proximity: composing the per-mode ratings of one address.

use crate::domain::{StopKind, TransitPreferences};

use super::error::RatingError;
use super::weights::WeightedSum;

/// Proximity ratings per stop kind for one address.
///
/// A kind is `None` when its preference is `None` or the provider had no
/// usable stops for it. Absent kinds are left out of the composition.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModeRatings {
    pub cta: Option<f64>,
    pub divvy: Option<f64>,
    pub shuttles: Option<f64>,
}

impl ModeRatings {
    pub fn get(&self, kind: StopKind) -> Option<f64> {
        match kind {
            StopKind::Cta => self.cta,
            StopKind::Divvy => self.divvy,
            StopKind::Shuttles => self.shuttles,
        }
    }

    pub fn set(&mut self, kind: StopKind, rating: Option<f64>) {
        match kind {
            StopKind::Cta => self.cta = rating,
            StopKind::Divvy => self.divvy = rating,
            StopKind::Shuttles => self.shuttles = rating,
        }
    }

    pub fn is_empty(&self) -> bool {
        StopKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }
}

/// Combine mode ratings into one location score, weighted by preference.
///
/// Only modes with a rating and a preference other than `None` enter the
/// weight sum. Calling this with no such mode is a configuration error.
pub fn location_rating(
    ratings: &ModeRatings,
    prefs: &TransitPreferences,
) -> Result<f64, RatingError> {
    let mut score = WeightedSum::new();

    for kind in StopKind::ALL {
        let level = prefs.level(kind.mode());
        if level.is_none() {
            continue;
        }
        if let Some(rating) = ratings.get(kind) {
            score.add(rating, level.weight());
        }
    }

    score.average().ok_or_else(|| {
        RatingError::Configuration("no CTA, Divvy or shuttle rating to combine".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Mode, PreferenceLevel};

    #[test]
    fn weights_by_preference() {
        let prefs = TransitPreferences::default()
            .with(Mode::Cta, PreferenceLevel::High)
            .with(Mode::Bicycling, PreferenceLevel::Low)
            .with(Mode::Shuttles, PreferenceLevel::Medium);
        let ratings = ModeRatings {
            cta: Some(100.0),
            divvy: Some(700.0),
            shuttles: Some(400.0),
        };

        let score = location_rating(&ratings, &prefs).unwrap();
        assert_eq!(score, (4.0 * 100.0 + 700.0 + 2.0 * 400.0) / 7.0);
    }

    #[test]
    fn none_preference_changes_denominator() {
        let prefs = TransitPreferences::default()
            .with(Mode::Cta, PreferenceLevel::High)
            .with(Mode::Shuttles, PreferenceLevel::None);
        let ratings = ModeRatings {
            cta: Some(100.0),
            divvy: None,
            // Ignored: shuttles have no preference
            shuttles: Some(10_000.0),
        };

        assert_eq!(location_rating(&ratings, &prefs).unwrap(), 100.0);
    }

    #[test]
    fn all_absent_is_a_configuration_error() {
        let prefs = TransitPreferences::default().with(Mode::Cta, PreferenceLevel::Low);
        let err = location_rating(&ModeRatings::default(), &prefs).unwrap_err();
        assert!(matches!(err, RatingError::Configuration(_)));
    }

    #[test]
    fn set_and_get() {
        let mut ratings = ModeRatings::default();
        assert!(ratings.is_empty());
        ratings.set(StopKind::Divvy, Some(3.0));
        assert_eq!(ratings.get(StopKind::Divvy), Some(3.0));
        assert!(!ratings.is_empty());
    }
}
