//! Points of interest: rating how easily an address reaches them.

use crate::domain::{Mode, TransitPreferences, TravelMode};

use super::adjust::adjust;
use super::error::RatingError;
use super::nearest::two_nearest;
use super::weights::WeightedSum;

/// Weights for the best and second-best adjusted mode time to a POI.
pub const POI_MODE_WEIGHTS: (f64, f64) = (4.0, 1.0);

/// Modes that can carry the searcher to a POI, in evaluation order.
///
/// Shuttles only serve fixed campus routes and are not routed to arbitrary
/// places.
pub const POI_MODES: [Mode; 4] = [Mode::Walking, Mode::Driving, Mode::Cta, Mode::Bicycling];

/// The provider routing mode that measures `mode` directly.
///
/// `Bicycling` returns `None`: bike share is composed from a walk to a
/// station, a ride between stations and a walk from the far station.
pub fn direct_travel_mode(mode: Mode) -> Option<TravelMode> {
    match mode {
        Mode::Walking => Some(TravelMode::Walking),
        Mode::Driving => Some(TravelMode::Driving),
        Mode::Cta => Some(TravelMode::Transit),
        Mode::Bicycling | Mode::Shuttles => None,
    }
}

/// POI-capable modes the searcher cares about.
pub fn active_poi_modes(prefs: &TransitPreferences) -> impl Iterator<Item = Mode> + '_ {
    prefs
        .active_modes()
        .filter(|mode| POI_MODES.contains(mode))
}

/// Door-to-door bike-share time: walk, ride, walk.
pub fn bike_share_time(walk_to_station: f64, ride: f64, walk_from_station: f64) -> f64 {
    walk_to_station + ride + walk_from_station
}

/// Rate one POI from the raw travel time of each available mode.
///
/// Each time is adjusted for its mode's preference, then the two best
/// adjusted times are averaged with [`POI_MODE_WEIGHTS`]. Returns `None` if
/// no mode could reach the POI.
pub fn poi_rating(
    times: &[(Mode, f64)],
    prefs: &TransitPreferences,
) -> Result<Option<f64>, RatingError> {
    let adjusted = times
        .iter()
        .map(|(mode, time)| adjust(*time, prefs.level(*mode)).map(|t| (*mode, t)))
        .collect::<Result<Vec<(Mode, f64)>, RatingError>>()?;

    Ok(two_nearest(adjusted).weighted(POI_MODE_WEIGHTS))
}

/// Combine per-POI ratings into one score.
///
/// `ratings` holds `(rank, rating)` where `rank` is the POI's 0-indexed
/// position in the searcher's list; its weight is `1 / (rank + 1)`, so earlier
/// POIs dominate. POIs that could not be rated are simply absent.
pub fn combine_poi_ratings(ratings: &[(usize, f64)]) -> Option<f64> {
    let mut score = WeightedSum::new();
    for &(rank, rating) in ratings {
        score.add(rating, 1.0 / (rank as f64 + 1.0));
    }
    score.average()
}
