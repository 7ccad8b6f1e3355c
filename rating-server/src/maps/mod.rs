//! Maps web-service client.
//!
//! Geocoding, distance matrix and place search against a Google-style
//! maps API, plus an in-memory provider for tests and offline use.
//!
//! Key characteristics of the API:
//! - Every response carries a top-level `status`; only `OK` has results
//! - Distance matrix requests take at most 25 destinations
//! - Durations are integer seconds

mod client;
mod error;
mod mock;
mod types;

pub use client::{MAX_DESTINATIONS_PER_REQUEST, MapsClient, MapsConfig};
pub use error::ProviderError;
pub use mock::MockProvider;
pub use types::{
    DistanceMatrixResponse, FindPlaceResponse, GeocodeResponse, PlaceCandidate, check_status,
};
