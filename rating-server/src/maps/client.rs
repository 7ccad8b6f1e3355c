//! Maps web-service HTTP client.
//!
//! Provides async methods for geocoding, distance matrices and place
//! search. Handles the API key, concurrency limits and conversion of API
//! statuses to [`ProviderError`].

use std::sync::Arc;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{LatLon, TravelMode};
use crate::rating::PlaceResult;

use super::error::ProviderError;
use super::types::{
    DistanceMatrixResponse, FindPlaceResponse, GeocodeResponse, STATUS_OK, check_status,
};

/// Default base URL for the maps web services.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Most destinations the distance matrix accepts per request.
pub const MAX_DESTINATIONS_PER_REQUEST: usize = 25;

/// Configuration for the maps client.
#[derive(Debug, Clone)]
pub struct MapsConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Destinations per distance matrix request
    pub max_destinations: usize,
}

impl MapsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            max_destinations: MAX_DESTINATIONS_PER_REQUEST,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set destinations per distance matrix request (at most 25).
    pub fn with_max_destinations(mut self, n: usize) -> Self {
        self.max_destinations = n.clamp(1, MAX_DESTINATIONS_PER_REQUEST);
        self
    }
}

/// Maps web-service client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct MapsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_destinations: usize,
    semaphore: Arc<Semaphore>,
}

impl MapsClient {
    /// Create a new maps client with the given configuration.
    pub fn new(config: MapsConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            max_destinations: config.max_destinations.clamp(1, MAX_DESTINATIONS_PER_REQUEST),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Geocode a free-text address to its first match.
    pub async fn geocode(&self, address: &str) -> Result<LatLon, ProviderError> {
        let response: GeocodeResponse = self
            .get_json("geocode/json", &[("address", address.to_string())])
            .await?;
        check_status(
            &response.status,
            response.error_message.as_deref(),
            address,
        )?;

        let first = response
            .results
            .first()
            .ok_or_else(|| ProviderError::NotFound(address.to_string()))?;
        debug!(address, formatted = %first.formatted_address, "geocoded");

        first.geometry.location.to_lat_lon()
    }

    /// Travel times in seconds from `origin` to each destination.
    ///
    /// Large batches are split into requests of at most
    /// `max_destinations` destinations; results keep the destination order.
    pub async fn distance_matrix(
        &self,
        origin: LatLon,
        destinations: &[LatLon],
        mode: TravelMode,
    ) -> Result<Vec<f64>, ProviderError> {
        if destinations.is_empty() {
            return Ok(Vec::new());
        }

        let chunks = try_join_all(
            destinations
                .chunks(self.max_destinations)
                .map(|chunk| self.distance_chunk(origin, chunk, mode)),
        )
        .await?;

        Ok(chunks.into_iter().flatten().collect())
    }

    async fn distance_chunk(
        &self,
        origin: LatLon,
        destinations: &[LatLon],
        mode: TravelMode,
    ) -> Result<Vec<f64>, ProviderError> {
        let joined = destinations
            .iter()
            .map(LatLon::to_string)
            .collect::<Vec<_>>()
            .join("|");

        let response: DistanceMatrixResponse = self
            .get_json(
                "distancematrix/json",
                &[
                    ("origins", origin.to_string()),
                    ("destinations", joined),
                    ("mode", mode.as_str().to_string()),
                ],
            )
            .await?;
        check_status(
            &response.status,
            response.error_message.as_deref(),
            &origin.to_string(),
        )?;

        let row = response.rows.first().ok_or_else(|| {
            ProviderError::UnexpectedResponse("distance matrix returned no rows".to_string())
        })?;
        if row.elements.len() != destinations.len() {
            return Err(ProviderError::UnexpectedResponse(format!(
                "expected {} distance matrix elements, got {}",
                destinations.len(),
                row.elements.len()
            )));
        }

        row.elements
            .iter()
            .zip(destinations)
            .map(|(element, destination)| {
                let no_route = || ProviderError::NoRoute {
                    origin,
                    destination: *destination,
                    mode,
                };
                if element.status != STATUS_OK {
                    return Err(no_route());
                }
                element
                    .duration
                    .as_ref()
                    .map(|duration| duration.value)
                    .ok_or_else(no_route)
            })
            .collect()
    }

    /// Find the best match for a place query, biased towards `near`.
    pub async fn find_place(&self, query: &str, near: LatLon) -> Result<PlaceResult, ProviderError> {
        let response: FindPlaceResponse = self
            .get_json(
                "place/findplacefromtext/json",
                &[
                    ("input", query.to_string()),
                    ("inputtype", "textquery".to_string()),
                    ("fields", "name,formatted_address,geometry".to_string()),
                    ("locationbias", format!("point:{near}")),
                ],
            )
            .await?;
        check_status(&response.status, response.error_message.as_deref(), query)?;

        response
            .candidates
            .first()
            .ok_or_else(|| ProviderError::NotFound(query.to_string()))?
            .to_place()
    }

    /// Issue a GET request and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, path);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
