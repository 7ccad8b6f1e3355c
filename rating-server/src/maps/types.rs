//! Maps web-service response types.
//!
//! These mirror the JSON returned by the geocoding, distance matrix and
//! find-place endpoints. Only the fields the engine reads are modelled.

use serde::Deserialize;

use crate::domain::LatLon;
use crate::rating::PlaceResult;

use super::error::ProviderError;

/// Top-level status values shared by every endpoint.
pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";
pub const STATUS_REQUEST_DENIED: &str = "REQUEST_DENIED";
pub const STATUS_OVER_QUERY_LIMIT: &str = "OVER_QUERY_LIMIT";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLocation {
    pub lat: f64,
    pub lng: f64,
}

impl ApiLocation {
    pub fn to_lat_lon(&self) -> Result<LatLon, ProviderError> {
        LatLon::new(self.lat, self.lng)
            .map_err(|e| ProviderError::UnexpectedResponse(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: ApiLocation,
}

/// Response of `/geocode/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

/// Response of `/distancematrix/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    pub status: String,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixRow {
    pub elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixElement {
    pub status: String,
    pub duration: Option<TextValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextValue {
    pub value: f64,
    #[serde(default)]
    pub text: String,
}

/// Response of `/place/findplacefromtext/json`.
#[derive(Debug, Clone, Deserialize)]
pub struct FindPlaceResponse {
    pub status: String,
    #[serde(default)]
    pub candidates: Vec<PlaceCandidate>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceCandidate {
    #[serde(default)]
    pub name: String,
    pub formatted_address: String,
    pub geometry: Geometry,
}

impl PlaceCandidate {
    pub fn to_place(&self) -> Result<PlaceResult, ProviderError> {
        Ok(PlaceResult {
            name: self.name.clone(),
            formatted_address: self.formatted_address.clone(),
            location: self.geometry.location.to_lat_lon()?,
        })
    }
}

/// Map a non-OK top-level status to an error.
///
/// `subject` names what was looked up, for `NotFound` messages.
pub fn check_status(
    status: &str,
    error_message: Option<&str>,
    subject: &str,
) -> Result<(), ProviderError> {
    match status {
        STATUS_OK => Ok(()),
        STATUS_ZERO_RESULTS | STATUS_NOT_FOUND => Err(ProviderError::NotFound(subject.to_string())),
        STATUS_REQUEST_DENIED => Err(ProviderError::Unauthorized),
        STATUS_OVER_QUERY_LIMIT => Err(ProviderError::RateLimited),
        other => Err(ProviderError::Api {
            status: 200,
            message: match error_message {
                Some(message) => format!("{other}: {message}"),
                None => other.to_string(),
            },
        }),
    }
}
