//! Geographic coordinates and the supported service area.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mean earth radius used for great-circle distances, in metres.
const EARTH_RADIUS_M: f64 = 6_367_000.0;

/// Error returned when constructing an out-of-range coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lon}): {reason}")]
pub struct InvalidCoordinate {
    lat: f64,
    lon: f64,
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair.
///
/// Latitude is within `[-90, 90]` and longitude within `[-180, 180]`;
/// both are finite. This is guaranteed by [`LatLon::new`].
///
/// # Examples
///
/// ```
/// use rating_server::domain::LatLon;
///
/// let regenstein = LatLon::new(41.7923, -87.5996).unwrap();
/// assert_eq!(regenstein.lat(), 41.7923);
///
/// assert!(LatLon::new(91.0, 0.0).is_err());
/// assert!(LatLon::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLatLon", into = "RawLatLon")]
pub struct LatLon {
    lat: f64,
    lon: f64,
}

#[derive(Serialize, Deserialize)]
struct RawLatLon {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawLatLon> for LatLon {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawLatLon) -> Result<Self, Self::Error> {
        LatLon::new(raw.lat, raw.lon)
    }
}

impl From<LatLon> for RawLatLon {
    fn from(c: LatLon) -> Self {
        RawLatLon {
            lat: c.lat,
            lon: c.lon,
        }
    }
}

impl LatLon {
    /// Create a coordinate, validating ranges.
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "latitude must be within [-90, 90]",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "longitude must be within [-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Great-circle distance to `other` in metres.
    pub fn haversine_m(&self, other: &LatLon) -> f64 {
        let (lat1, lon1) = (self.lat.to_radians(), self.lon.to_radians());
        let (lat2, lon2) = (other.lat.to_radians(), other.lon.to_radians());
        let a = ((lat2 - lat1) / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * ((lon2 - lon1) / 2.0).sin().powi(2);
        2.0 * a.sqrt().asin() * EARTH_RADIUS_M
    }

    /// Key suitable for hashing: the raw bit patterns of both components.
    pub fn bits(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lon.to_bits())
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}

/// Restricts candidate addresses to the region the engine supports.
pub trait RegionFilter {
    /// Returns true if the coordinate lies inside the region.
    fn contains(&self, point: &LatLon) -> bool;
}

/// An axis-aligned latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceArea {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl ServiceArea {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Hyde Park and Kenwood.
    pub fn hyde_park() -> Self {
        Self::new(41.765605, 41.812444, -87.625826, -87.583701)
    }

    /// Midpoint of the box, used to bias place searches.
    pub fn center(&self) -> LatLon {
        LatLon {
            lat: (self.min_lat + self.max_lat) / 2.0,
            lon: (self.min_lon + self.max_lon) / 2.0,
        }
    }
}

impl Default for ServiceArea {
    fn default() -> Self {
        Self::hyde_park()
    }
}

impl RegionFilter for ServiceArea {
    fn contains(&self, point: &LatLon) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ll(lat: f64, lon: f64) -> LatLon {
        LatLon::new(lat, lon).unwrap()
    }

    #[test]
    fn reject_out_of_range() {
        assert!(LatLon::new(-90.1, 0.0).is_err());
        assert!(LatLon::new(0.0, 180.5).is_err());
        assert!(LatLon::new(0.0, f64::INFINITY).is_err());
        assert!(LatLon::new(90.0, -180.0).is_ok());
    }

    #[test]
    fn haversine_zero_for_same_point() {
        let p = ll(41.79, -87.60);
        assert_eq!(p.haversine_m(&p), 0.0);
    }

    #[test]
    fn haversine_one_degree_latitude() {
        // One degree of latitude on a 6367 km sphere
        let d = ll(41.0, -87.6).haversine_m(&ll(42.0, -87.6));
        assert!((d - 111_125.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn hyde_park_contains_campus() {
        let area = ServiceArea::hyde_park();
        assert!(area.contains(&ll(41.7923, -87.5996)));
        // The Loop
        assert!(!area.contains(&ll(41.8837, -87.6325)));
        assert!(area.contains(&area.center()));
    }

    #[test]
    fn deserialize_validates() {
        let ok: LatLon = serde_json::from_str(r#"{"lat": 41.8, "lon": -87.6}"#).unwrap();
        assert_eq!(ok, ll(41.8, -87.6));

        let bad = serde_json::from_str::<LatLon>(r#"{"lat": 141.8, "lon": -87.6}"#);
        assert!(bad.is_err());
    }
}
