//! Collaborators the engine consumes: geocoding, travel times and place
//! search.
//!
//! These abstractions let the engine run against the live maps API or
//! against deterministic stubs.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::domain::{LatLon, StopKind, TravelMode, TravelTimeMap};
use crate::maps::ProviderError;

/// A resolved point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub formatted_address: String,
    pub location: LatLon,
}

/// Turns free-text addresses into coordinates.
pub trait Geocoder {
    /// Locate an address. Unknown addresses are [`ProviderError::NotFound`].
    fn locate(&self, address: &str) -> impl Future<Output = Result<LatLon, ProviderError>> + Send;
}

/// Measures travel times.
pub trait TravelTimeProvider {
    /// Walking times from `origin` to nearby stops of one kind, one entry per
    /// target id (route or station), each carrying the stop's coordinates.
    fn nearby(
        &self,
        kind: StopKind,
        origin: LatLon,
    ) -> impl Future<Output = Result<TravelTimeMap, ProviderError>> + Send;

    /// Walking times from `origin` to the Divvy stations nearest it, each
    /// carrying the station's coordinates.
    ///
    /// Unlike [`nearby`](Self::nearby) this is not limited to the service
    /// area: `origin` is a point of interest that may lie anywhere.
    fn stations_near(
        &self,
        origin: LatLon,
    ) -> impl Future<Output = Result<TravelTimeMap, ProviderError>> + Send;

    /// Travel times in seconds from `origin` to each destination, in order.
    ///
    /// One call covers all destinations.
    fn distance(
        &self,
        origin: LatLon,
        destinations: &[LatLon],
        mode: TravelMode,
    ) -> impl Future<Output = Result<Vec<f64>, ProviderError>> + Send;
}

/// Resolves free-text place queries.
pub trait PlaceSearch {
    /// Resolve `query` to a single place, biased towards `near`.
    fn resolve(
        &self,
        query: &str,
        near: LatLon,
    ) -> impl Future<Output = Result<PlaceResult, ProviderError>> + Send;
}

/// Everything the rating engine needs from the outside world.
pub trait RatingProvider: Geocoder + TravelTimeProvider + PlaceSearch + Sync {}

impl<T> RatingProvider for T where T: Geocoder + TravelTimeProvider + PlaceSearch + Sync {}
