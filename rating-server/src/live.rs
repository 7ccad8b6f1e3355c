//! Provider backed by the live maps API and the stop catalogue.

use tracing::debug;

use crate::cache::CachedMapsClient;
use crate::domain::{
    LatLon, ServiceArea, StopKind, TravelMode, TravelTimeEntry, TravelTimeMap,
};
use crate::maps::ProviderError;
use crate::rating::{Geocoder, PlaceResult, PlaceSearch, TravelTimeProvider};
use crate::stops::{Stop, StopCatalog};

/// Divvy stations measured around a point of interest.
const STATIONS_NEAR_PLACE: usize = 3;

/// Answers rating lookups with cached maps API calls.
///
/// Nearby-stop times come from the catalogue: the closest stop of each
/// target inside the service area, then one batched walking request.
/// Stations around a point of interest are the few nearest in the whole
/// catalogue.
pub struct LiveProvider {
    maps: CachedMapsClient,
    stops: StopCatalog,
    area: ServiceArea,
}

impl LiveProvider {
    pub fn new(maps: CachedMapsClient, stops: StopCatalog, area: ServiceArea) -> Self {
        Self { maps, stops, area }
    }

    /// One batched walking request from `origin` to every stop.
    async fn walking_times(
        &self,
        origin: LatLon,
        stops: Vec<Stop>,
    ) -> Result<TravelTimeMap, ProviderError> {
        let destinations: Vec<LatLon> = stops.iter().map(|stop| stop.location).collect();
        let times = self
            .maps
            .distance_matrix(origin, &destinations, TravelMode::Walking)
            .await?;
        if times.len() != stops.len() {
            return Err(ProviderError::UnexpectedResponse(format!(
                "expected {} walking times, got {}",
                stops.len(),
                times.len()
            )));
        }

        Ok(stops
            .into_iter()
            .zip(times)
            .map(|(stop, time)| {
                let entry = TravelTimeEntry::new(stop.id.clone(), time).with_coordinates(stop.location);
                (stop.id, entry)
            })
            .collect())
    }
}

impl Geocoder for LiveProvider {
    async fn locate(&self, address: &str) -> Result<LatLon, ProviderError> {
        self.maps.geocode(address).await
    }
}

impl TravelTimeProvider for LiveProvider {
    async fn nearby(&self, kind: StopKind, origin: LatLon) -> Result<TravelTimeMap, ProviderError> {
        let candidates = self.stops.candidates(kind, origin, &self.area);
        if candidates.is_empty() {
            debug!(%kind, %origin, "no stops in service area");
            return Ok(TravelTimeMap::new());
        }

        self.walking_times(origin, candidates).await
    }

    async fn stations_near(&self, origin: LatLon) -> Result<TravelTimeMap, ProviderError> {
        let stations = self.stops.nearest(StopKind::Divvy, origin, STATIONS_NEAR_PLACE);
        if stations.is_empty() {
            return Ok(TravelTimeMap::new());
        }
        self.walking_times(origin, stations).await
    }

    async fn distance(
        &self,
        origin: LatLon,
        destinations: &[LatLon],
        mode: TravelMode,
    ) -> Result<Vec<f64>, ProviderError> {
        self.maps.distance_matrix(origin, destinations, mode).await
    }
}

impl PlaceSearch for LiveProvider {
    async fn resolve(&self, query: &str, near: LatLon) -> Result<PlaceResult, ProviderError> {
        self.maps.find_place(query, near).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;
    use crate::maps::{MapsClient, MapsConfig};

    fn offline_provider(stops: StopCatalog) -> LiveProvider {
        let client =
            MapsClient::new(MapsConfig::new("test-key").with_base_url("http://127.0.0.1:9"))
                .unwrap();
        LiveProvider::new(
            CachedMapsClient::new(client, &CacheConfig::default()),
            stops,
            ServiceArea::hyde_park(),
        )
    }

    #[tokio::test]
    async fn no_candidates_means_no_request() {
        let mut stops = StopCatalog::new();
        // Downtown, outside the service area
        stops.add(
            StopKind::Cta,
            Stop::new("3", LatLon::new(41.8781, -87.6298).unwrap()),
        );
        let provider = offline_provider(stops);
        let origin = LatLon::new(41.7943, -87.5907).unwrap();

        let cta = provider.nearby(StopKind::Cta, origin).await.unwrap();
        assert!(cta.is_empty());

        let divvy = provider.nearby(StopKind::Divvy, origin).await.unwrap();
        assert!(divvy.is_empty());
    }

    #[tokio::test]
    async fn api_failure_propagates() {
        let mut stops = StopCatalog::new();
        stops.add(
            StopKind::Cta,
            Stop::new("6", LatLon::new(41.7950, -87.5860).unwrap()),
        );
        let provider = offline_provider(stops);
        let origin = LatLon::new(41.7943, -87.5907).unwrap();

        assert!(matches!(
            provider.nearby(StopKind::Cta, origin).await,
            Err(ProviderError::Http(_))
        ));
    }

    #[tokio::test]
    async fn stations_near_place_ignore_service_area() {
        let mut stops = StopCatalog::new();
        stops.add(
            StopKind::Divvy,
            Stop::new("Wacker Dr & Adams St", LatLon::new(41.8794, -87.6367).unwrap()),
        );
        let provider = offline_provider(stops);
        let union_station = LatLon::new(41.8789, -87.6359).unwrap();

        // In-area lookup finds nothing and makes no request
        let in_area = provider.nearby(StopKind::Divvy, union_station).await.unwrap();
        assert!(in_area.is_empty());

        // The downtown dock is measured, so the offline client is called
        assert!(matches!(
            provider.stations_near(union_station).await,
            Err(ProviderError::Http(_))
        ));
    }

    #[tokio::test]
    async fn stations_near_empty_catalogue_makes_no_request() {
        let provider = offline_provider(StopCatalog::new());
        let origin = LatLon::new(41.8789, -87.6359).unwrap();

        assert!(provider.stations_near(origin).await.unwrap().is_empty());
    }
}
