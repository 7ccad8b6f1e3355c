//! Per-mode proximity ratings for CTA, Divvy and campus shuttles.
//!
//! Each rating turns the walking times from an address to nearby stops into
//! a single time-like number (seconds, lower is better). `None` means the
//! provider returned nothing usable for the mode.

use crate::domain::{CtaFocus, DestinationZone, StopKind, TravelTimeMap};

use super::classify::RouteClassifier;
use super::error::LookupError;
use super::nearest::two_nearest;
use super::weights::{WeightedSum, weighted_average};

/// Weights for the nearest and second-nearest CTA route in a zone.
pub const CTA_ROUTE_WEIGHTS: (f64, f64) = (4.0, 1.0);

/// Weights for the nearest and second-nearest Divvy station.
pub const DIVVY_STATION_WEIGHTS: (f64, f64) = (4.0, 1.0);

/// Weights for the nearest and second-nearest route within a shuttle list.
pub const SHUTTLE_ROUTE_WEIGHTS: (f64, f64) = (3.0, 1.0);

/// Day list weight, night list weight.
pub const SHUTTLE_DAY_NIGHT_WEIGHTS: (f64, f64) = (1.0, 2.0);

/// Shuttle routes running during the day.
pub const DAY_SHUTTLES: [&str; 7] = [
    "53rd Street Express",
    "Apostolic/Drexel",
    "Campus Shuttle",
    "Friend Center/Metra",
    "Hyde Park Route",
    "Midway Route",
    "Polsky Express",
];

/// Shuttle routes running at night.
pub const NIGHT_SHUTTLES: [&str; 6] = [
    "Central",
    "East",
    "North",
    "South",
    "Regents Express",
    "South Loop Shuttle",
];

/// How much each destination zone counts towards the CTA rating.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneWeights {
    pub hyde_park: f64,
    pub downtown: f64,
    pub south_side: f64,
    pub uchicago: f64,
}

impl ZoneWeights {
    /// Default weights adjusted for the searcher's focus.
    pub fn for_preferences(focus: CtaFocus, south_side: bool) -> Self {
        let mut weights = Self::default();
        match focus {
            CtaFocus::HydePark => {
                weights.hyde_park = 2.0;
                weights.uchicago = 6.0;
            }
            CtaFocus::Downtown => weights.downtown = 8.0,
            CtaFocus::Neither => {}
        }
        if south_side {
            weights.south_side = 4.0;
        }
        weights
    }

    pub fn get(&self, zone: DestinationZone) -> f64 {
        match zone {
            DestinationZone::HydePark => self.hyde_park,
            DestinationZone::Downtown => self.downtown,
            DestinationZone::SouthSide => self.south_side,
            DestinationZone::UChicago => self.uchicago,
        }
    }
}

impl Default for ZoneWeights {
    fn default() -> Self {
        Self {
            hyde_park: 1.0,
            downtown: 4.0,
            south_side: 0.0,
            uchicago: 3.0,
        }
    }
}

/// CTA proximity: per-zone weighted nearest routes, composed by zone weight.
///
/// A route counts towards every zone it serves. Zones with no nearby route,
/// or with zero weight, are left out of the denominator.
pub fn cta_proximity(
    times: &TravelTimeMap,
    classifier: &RouteClassifier,
    weights: &ZoneWeights,
) -> Result<Option<f64>, LookupError> {
    let classified = times
        .values()
        .map(|entry| {
            classifier
                .zones_for_id(&entry.target_id)
                .map(|zones| (zones, entry))
        })
        .collect::<Result<Vec<_>, LookupError>>()?;

    let mut rating = WeightedSum::new();
    for zone in DestinationZone::ALL {
        let zone_weight = weights.get(zone);
        if zone_weight == 0.0 {
            continue;
        }

        let pair = two_nearest(
            classified
                .iter()
                .filter(|(zones, _)| zones.contains(zone))
                .map(|(_, entry)| (entry.target_id.as_str(), entry.time_seconds)),
        );

        if let Some(zone_time) = pair.weighted(CTA_ROUTE_WEIGHTS) {
            rating.add(zone_time, zone_weight);
        }
    }

    Ok(rating.average())
}

/// Divvy proximity: nearest two stations, weighted sum over weight sum.
pub fn divvy_proximity(times: &TravelTimeMap) -> Option<f64> {
    two_nearest(
        times
            .values()
            .map(|entry| (entry.target_id.as_str(), entry.time_seconds)),
    )
    .weighted(DIVVY_STATION_WEIGHTS)
}

/// Shuttle proximity: nearest day and night routes, night counted double.
///
/// Every named route must be present in `times`.
pub fn shuttle_proximity(times: &TravelTimeMap) -> Result<Option<f64>, LookupError> {
    let day = shuttle_list_rating(times, &DAY_SHUTTLES)?;
    let night = shuttle_list_rating(times, &NIGHT_SHUTTLES)?;

    Ok(match (day, night) {
        (Some(day), Some(night)) => Some(weighted_average(
            &[day, night],
            &[SHUTTLE_DAY_NIGHT_WEIGHTS.0, SHUTTLE_DAY_NIGHT_WEIGHTS.1],
        )),
        (day, night) => day.or(night),
    })
}

fn shuttle_list_rating(
    times: &TravelTimeMap,
    routes: &[&str],
) -> Result<Option<f64>, LookupError> {
    let entries = routes
        .iter()
        .map(|name| {
            times
                .get(*name)
                .map(|entry| (*name, entry.time_seconds))
                .ok_or_else(|| LookupError::MissingShuttleRoute((*name).to_string()))
        })
        .collect::<Result<Vec<_>, LookupError>>()?;

    Ok(two_nearest(entries).weighted(SHUTTLE_ROUTE_WEIGHTS))
}

/// One proximity rating per stop kind, composed uniformly by the location
/// rater.
#[derive(Debug, Clone, Copy)]
pub enum ModeRater<'a> {
    Cta {
        classifier: &'a RouteClassifier,
        weights: ZoneWeights,
    },
    Divvy,
    Shuttles,
}

impl ModeRater<'_> {
    /// The stop kind whose travel times this rater consumes.
    pub fn kind(&self) -> StopKind {
        match self {
            ModeRater::Cta { .. } => StopKind::Cta,
            ModeRater::Divvy => StopKind::Divvy,
            ModeRater::Shuttles => StopKind::Shuttles,
        }
    }

    pub fn rate(&self, times: &TravelTimeMap) -> Result<Option<f64>, LookupError> {
        match self {
            ModeRater::Cta {
                classifier,
                weights,
            } => cta_proximity(times, classifier, weights),
            ModeRater::Divvy => Ok(divvy_proximity(times)),
            ModeRater::Shuttles => shuttle_proximity(times),
        }
    }
}
