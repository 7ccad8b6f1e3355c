//! Address scoring and ranking.
//!
//! Scores are time-like: lower is better.

use serde::Serialize;

use super::weights::weighted_average;

/// Location weight, POI weight.
pub const LOCATION_POI_WEIGHTS: (f64, f64) = (1.0, 1.0);

/// Final score of one address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressRating {
    pub address: String,
    pub score: f64,
}

/// An address at its position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedAddress {
    /// 1-indexed position, best first.
    pub rank: usize,
    pub address: String,
    pub score: f64,
}

/// Combine the location and POI scores of one address.
///
/// Without POIs the location score stands alone (and vice versa when no
/// location mode is rated). Returns `None` when neither is available.
pub fn address_score(location: Option<f64>, poi: Option<f64>) -> Option<f64> {
    match (location, poi) {
        (Some(location), Some(poi)) => Some(weighted_average(
            &[location, poi],
            &[LOCATION_POI_WEIGHTS.0, LOCATION_POI_WEIGHTS.1],
        )),
        (location, poi) => location.or(poi),
    }
}

/// Rank addresses by ascending score.
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_addresses(ratings: &[AddressRating]) -> Vec<RankedAddress> {
    let mut sorted: Vec<&AddressRating> = ratings.iter().collect();
    sorted.sort_by(|a, b| a.score.total_cmp(&b.score));

    sorted
        .into_iter()
        .enumerate()
        .map(|(idx, rating)| RankedAddress {
            rank: idx + 1,
            address: rating.address.clone(),
            score: rating.score,
        })
        .collect()
}
