//! Caching layer for maps API responses.
//!
//! Geocodes, place lookups and travel times change rarely, and ranking the
//! same neighbourhood again repeats most lookups. Travel times are cached per
//! (origin, destination, mode) so a batched request only asks the API for
//! the pairs it has not seen.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{LatLon, TravelMode};
use crate::maps::{MapsClient, ProviderError};
use crate::rating::PlaceResult;

type PointKey = (u64, u64);

/// Cache key for travel times: (origin, destination, mode).
type DistanceKey = (PointKey, PointKey, TravelMode);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per table.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(6 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache for maps API responses.
pub struct MapsCache {
    geocodes: MokaCache<String, LatLon>,
    places: MokaCache<(String, PointKey), PlaceResult>,
    distances: MokaCache<DistanceKey, f64>,
}

impl MapsCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            geocodes: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            places: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            distances: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }
}

/// Maps client with caching.
///
/// Wraps a `MapsClient`; only successful responses are cached.
pub struct CachedMapsClient {
    client: MapsClient,
    cache: MapsCache,
}

impl CachedMapsClient {
    /// Create a new cached client.
    pub fn new(client: MapsClient, cache_config: &CacheConfig) -> Self {
        Self {
            client,
            cache: MapsCache::new(cache_config),
        }
    }

    /// Geocode an address, using cache if available.
    pub async fn geocode(&self, address: &str) -> Result<LatLon, ProviderError> {
        if let Some(cached) = self.cache.geocodes.get(address).await {
            return Ok(cached);
        }

        let location = self.client.geocode(address).await?;
        self.cache
            .geocodes
            .insert(address.to_string(), location)
            .await;
        Ok(location)
    }

    /// Find a place, using cache if available.
    pub async fn find_place(&self, query: &str, near: LatLon) -> Result<PlaceResult, ProviderError> {
        let key = (query.to_string(), near.bits());
        if let Some(cached) = self.cache.places.get(&key).await {
            return Ok(cached);
        }

        let place = self.client.find_place(query, near).await?;
        self.cache.places.insert(key, place.clone()).await;
        Ok(place)
    }

    /// Travel times from `origin` to each destination.
    ///
    /// Cached pairs are answered locally; the rest go to the API in one
    /// batched request.
    pub async fn distance_matrix(
        &self,
        origin: LatLon,
        destinations: &[LatLon],
        mode: TravelMode,
    ) -> Result<Vec<f64>, ProviderError> {
        let mut cached = Vec::with_capacity(destinations.len());
        for destination in destinations {
            cached.push(
                self.cache
                    .distances
                    .get(&(origin.bits(), destination.bits(), mode))
                    .await,
            );
        }

        let misses = missing_destinations(&cached, destinations);
        if misses.is_empty() {
            return Ok(cached.into_iter().flatten().collect());
        }

        debug!(
            %origin,
            %mode,
            hits = destinations.len() - misses.len(),
            misses = misses.len(),
            "fetching travel times"
        );

        let fetched = self.client.distance_matrix(origin, &misses, mode).await?;
        if fetched.len() != misses.len() {
            return Err(ProviderError::UnexpectedResponse(format!(
                "expected {} travel times, got {}",
                misses.len(),
                fetched.len()
            )));
        }

        for (destination, time) in misses.iter().zip(&fetched) {
            self.cache
                .distances
                .insert((origin.bits(), destination.bits(), mode), *time)
                .await;
        }

        merge_times(&cached, destinations, &misses, &fetched)
    }
}

/// Destinations with no cached time, first occurrence only.
fn missing_destinations(cached: &[Option<f64>], destinations: &[LatLon]) -> Vec<LatLon> {
    let mut misses: Vec<LatLon> = Vec::new();
    for (time, destination) in cached.iter().zip(destinations) {
        if time.is_none() && !misses.contains(destination) {
            misses.push(*destination);
        }
    }
    misses
}

/// Fill the cache misses in `cached` from the fetched times.
///
/// `fetched` must hold one time per entry of `misses`; a destination with
/// neither a cached nor a fetched time is an error.
fn merge_times(
    cached: &[Option<f64>],
    destinations: &[LatLon],
    misses: &[LatLon],
    fetched: &[f64],
) -> Result<Vec<f64>, ProviderError> {
    if fetched.len() != misses.len() {
        return Err(ProviderError::UnexpectedResponse(format!(
            "expected {} travel times, got {}",
            misses.len(),
            fetched.len()
        )));
    }

    cached
        .iter()
        .zip(destinations)
        .map(|(time, destination)| match time {
            Some(time) => Ok(*time),
            None => misses
                .iter()
                .position(|miss| miss == destination)
                .map(|idx| fetched[idx])
                .ok_or_else(|| {
                    ProviderError::UnexpectedResponse(format!(
                        "no travel time fetched for {destination}"
                    ))
                }),
        })
        .collect()
}
