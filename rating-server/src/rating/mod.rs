//! Address rating engine.
//!
//! This module answers: "of these candidate addresses, which is best
//! placed for the way I get around?"
//!
//! Each address gets a time-like score (lower is better) from two parts:
//! proximity to CTA routes, Divvy stations and campus shuttles, and travel
//! time to the user's points of interest. Both are weighted by how much the
//! user cares about each mode, then addresses are ranked by score.

mod adjust;
mod classify;
mod config;
mod engine;
mod error;
mod location;
mod modes;
mod nearest;
mod poi;
mod provider;
mod rank;
mod weights;


pub use adjust::{BRACKETS, adjust, bracket_offset};
pub use classify::{CTA_ROUTES, RouteClassifier};
pub use config::RatingConfig;
pub use engine::{
    RatingEngine, RatingFailure, RatingReport, RatingRequest, ResolvedPoi,
};
pub use error::{LookupError, RatingError};
pub use location::{ModeRatings, location_rating};
pub use modes::{
    DAY_SHUTTLES, ModeRater, NIGHT_SHUTTLES, ZoneWeights, cta_proximity, divvy_proximity,
    shuttle_proximity,
};
pub use nearest::{Nearest, NearestPair, two_nearest};
pub use poi::{bike_share_time, combine_poi_ratings, poi_rating};
pub use provider::{Geocoder, PlaceResult, PlaceSearch, RatingProvider, TravelTimeProvider};
pub use rank::{AddressRating, RankedAddress, address_score, rank_addresses};
pub use weights::{WeightedSum, weighted_average};
