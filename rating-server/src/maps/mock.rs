//! Mock maps provider for testing without API access.
//!
//! Serves geocodes, nearby-stop times, travel times and places from
//! in-memory tables, built either with builder methods or from a JSON
//! fixture file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

use crate::domain::{LatLon, StopKind, TravelMode, TravelTimeEntry, TravelTimeMap};
use crate::rating::{Geocoder, PlaceResult, PlaceSearch, TravelTimeProvider};

use super::error::ProviderError;

type PointKey = (u64, u64);

/// JSON fixture layout for [`MockProvider::from_file`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MockFixture {
    geocodes: HashMap<String, LatLon>,
    nearby: Vec<NearbyFixture>,
    distances: Vec<DistanceFixture>,
    places: HashMap<String, PlaceResult>,
    failing: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct NearbyFixture {
    kind: StopKind,
    origin: LatLon,
    entries: Vec<TravelTimeEntry>,
}

#[derive(Debug, Deserialize)]
struct DistanceFixture {
    origin: LatLon,
    destination: LatLon,
    mode: TravelMode,
    seconds: f64,
}

/// Deterministic provider that answers from fixed tables.
///
/// Unknown addresses and places are `NotFound`, unknown origin/destination
/// pairs are `NoRoute`, and an origin with no nearby table has no stops.
#[derive(Debug, Default)]
pub struct MockProvider {
    geocodes: HashMap<String, LatLon>,
    nearby: HashMap<(StopKind, PointKey), TravelTimeMap>,
    distances: HashMap<(TravelMode, PointKey, PointKey), f64>,
    places: HashMap<String, PlaceResult>,
    /// Addresses whose lookup fails, with the failure message.
    failing: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a provider from a JSON fixture file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ProviderError::Api {
            status: 0,
            message: format!("Failed to read {:?}: {}", path, e),
        })?;
        Self::from_json(&json)
    }

    /// Build a provider from fixture JSON.
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let fixture: MockFixture = serde_json::from_str(json).map_err(|e| ProviderError::Json {
            message: e.to_string(),
            body: Some(json.chars().take(500).collect()),
        })?;

        let mut provider = Self {
            geocodes: fixture.geocodes,
            places: fixture.places,
            failing: fixture.failing,
            ..Self::default()
        };
        for nearby in fixture.nearby {
            provider = provider.with_nearby(nearby.kind, nearby.origin, nearby.entries);
        }
        for d in fixture.distances {
            provider = provider.with_distance(d.origin, d.destination, d.mode, d.seconds);
        }
        Ok(provider)
    }

    pub fn with_address(mut self, address: impl Into<String>, location: LatLon) -> Self {
        self.geocodes.insert(address.into(), location);
        self
    }

    /// Stops of one kind near `origin`.
    pub fn with_nearby(
        mut self,
        kind: StopKind,
        origin: LatLon,
        entries: impl IntoIterator<Item = TravelTimeEntry>,
    ) -> Self {
        let map = entries
            .into_iter()
            .map(|entry| (entry.target_id.clone(), entry))
            .collect();
        self.nearby.insert((kind, origin.bits()), map);
        self
    }

    pub fn with_distance(
        mut self,
        origin: LatLon,
        destination: LatLon,
        mode: TravelMode,
        seconds: f64,
    ) -> Self {
        self.distances
            .insert((mode, origin.bits(), destination.bits()), seconds);
        self
    }

    pub fn with_place(mut self, query: impl Into<String>, place: PlaceResult) -> Self {
        self.places.insert(query.into(), place);
        self
    }

    /// Make every lookup of `address` fail with an API error.
    pub fn with_failing_address(
        mut self,
        address: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failing.insert(address.into(), message.into());
        self
    }

    /// Number of provider calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl Geocoder for MockProvider {
    async fn locate(&self, address: &str) -> Result<LatLon, ProviderError> {
        self.record_call();

        if let Some(message) = self.failing.get(address) {
            return Err(ProviderError::Api {
                status: 503,
                message: message.clone(),
            });
        }

        self.geocodes
            .get(address)
            .copied()
            .ok_or_else(|| ProviderError::NotFound(address.to_string()))
    }
}

impl TravelTimeProvider for MockProvider {
    async fn nearby(&self, kind: StopKind, origin: LatLon) -> Result<TravelTimeMap, ProviderError> {
        self.record_call();
        Ok(self
            .nearby
            .get(&(kind, origin.bits()))
            .cloned()
            .unwrap_or_default())
    }

    async fn stations_near(&self, origin: LatLon) -> Result<TravelTimeMap, ProviderError> {
        self.nearby(StopKind::Divvy, origin).await
    }

    async fn distance(
        &self,
        origin: LatLon,
        destinations: &[LatLon],
        mode: TravelMode,
    ) -> Result<Vec<f64>, ProviderError> {
        self.record_call();
        destinations
            .iter()
            .map(|destination| {
                self.distances
                    .get(&(mode, origin.bits(), destination.bits()))
                    .copied()
                    .ok_or(ProviderError::NoRoute {
                        origin,
                        destination: *destination,
                        mode,
                    })
            })
            .collect()
    }
}

impl PlaceSearch for MockProvider {
    async fn resolve(&self, query: &str, _near: LatLon) -> Result<PlaceResult, ProviderError> {
        self.record_call();
        self.places
            .get(query)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(query.to_string()))
    }
}
