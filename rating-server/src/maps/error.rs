//! Maps provider error types.

use crate::domain::{LatLon, TravelMode};

/// Errors from geocoding, distance and place lookups.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Address or place has no match
    #[error("not found: {0}")]
    NotFound(String),

    /// No route exists between two points for a mode
    #[error("no {mode} route from {origin} to {destination}")]
    NoRoute {
        origin: LatLon,
        destination: LatLon,
        mode: TravelMode,
    },

    /// Invalid API key or request denied
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by maps API")]
    RateLimited,

    /// Response was well-formed but did not match the request
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProviderError::NotFound("1 Nowhere Ln".into());
        assert_eq!(err.to_string(), "not found: 1 Nowhere Ln");

        let err = ProviderError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = ProviderError::NoRoute {
            origin: LatLon::new(41.79, -87.6).unwrap(),
            destination: LatLon::new(41.88, -87.63).unwrap(),
            mode: TravelMode::Transit,
        };
        assert_eq!(
            err.to_string(),
            "no transit route from 41.79,-87.6 to 41.88,-87.63"
        );
    }
}
