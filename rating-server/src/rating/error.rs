//! Rating engine error types.

use crate::domain::PreferenceLevel;
use crate::maps::ProviderError;

/// A static lookup table does not cover an id the provider returned.
///
/// This signals that the route tables are out of date with the provider's
/// data, so it aborts the whole request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// CTA route missing from the classification table
    #[error("CTA route {0} is not in the route classification table")]
    UnknownRoute(u32),

    /// CTA target id is not a route number
    #[error("CTA target id {0:?} is not a route number")]
    InvalidRouteId(String),

    /// A named shuttle route had no entry in the provider's response
    #[error("shuttle route {0:?} missing from provider data")]
    MissingShuttleRoute(String),
}

/// Errors from rating addresses.
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    /// The request cannot be rated as given
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The address geocodes outside the supported service area
    #[error("address {address:?} is outside the supported service area")]
    AddressOutOfRange { address: String },

    /// Geocoding, distance or stop lookup failed
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Route tables disagree with provider data
    #[error("lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// A preference level that time adjustment does not accept
    #[error("cannot adjust travel time for preference {0:?}")]
    InvalidPreference(PreferenceLevel),

    /// No requested mode produced any travel data for the address
    #[error("no transit data available for address {address:?}")]
    Unrateable { address: String },
}

impl RatingError {
    /// Whether this error must abort the whole request rather than a single
    /// address or POI.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RatingError::Configuration(_)
                | RatingError::Lookup(_)
                | RatingError::InvalidPreference(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RatingError::Lookup(LookupError::UnknownRoute(999));
        assert_eq!(
            err.to_string(),
            "lookup error: CTA route 999 is not in the route classification table"
        );

        let err = RatingError::AddressOutOfRange {
            address: "233 S Wacker Dr".into(),
        };
        assert_eq!(
            err.to_string(),
            "address \"233 S Wacker Dr\" is outside the supported service area"
        );

        let err = RatingError::InvalidPreference(PreferenceLevel::None);
        assert_eq!(err.to_string(), "cannot adjust travel time for preference None");
    }

    #[test]
    fn fatality() {
        assert!(RatingError::Configuration("x".into()).is_fatal());
        assert!(RatingError::Lookup(LookupError::MissingShuttleRoute("East".into())).is_fatal());
        assert!(
            !RatingError::AddressOutOfRange {
                address: "x".into()
            }
            .is_fatal()
        );
        assert!(!RatingError::Provider(ProviderError::RateLimited).is_fatal());
        assert!(!RatingError::Unrateable { address: "x".into() }.is_fatal());
    }
}
