//! Static catalogue of transit stops.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{LatLon, RegionFilter, StopKind};

use super::error::StopError;

/// One stop as listed in the catalogue file.
#[derive(Debug, Clone, Deserialize)]
struct StopRecord {
    id: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    divvy: Vec<StopRecord>,
    shuttles: Vec<StopRecord>,
    cta: Vec<StopRecord>,
}

/// A physical stop serving one target.
///
/// `id` is the target the stop serves: a Divvy station name, a shuttle route
/// name or a CTA route number. Many stops can share a target id.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: String,
    pub location: LatLon,
}

impl Stop {
    pub fn new(id: impl Into<String>, location: LatLon) -> Self {
        Self {
            id: id.into(),
            location,
        }
    }
}

/// Every known stop, by kind.
#[derive(Debug, Clone, Default)]
pub struct StopCatalog {
    stops: BTreeMap<StopKind, Vec<Stop>>,
}

impl StopCatalog {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalogue from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StopError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StopError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse a catalogue from JSON.
    ///
    /// Expects `{"divvy": [...], "shuttles": [...], "cta": [...]}` with
    /// `{"id", "lat", "lon"}` items. Missing kinds are empty.
    pub fn from_json(json: &str) -> Result<Self, StopError> {
        let file: CatalogFile = serde_json::from_str(json).map_err(|e| StopError::Json {
            message: e.to_string(),
        })?;

        let mut catalog = Self::new();
        for (kind, records) in [
            (StopKind::Divvy, file.divvy),
            (StopKind::Shuttles, file.shuttles),
            (StopKind::Cta, file.cta),
        ] {
            for record in records {
                let location =
                    LatLon::new(record.lat, record.lon).map_err(|e| StopError::InvalidStop {
                        kind,
                        id: record.id.clone(),
                        message: e.to_string(),
                    })?;
                catalog.add(kind, Stop::new(record.id, location));
            }
        }
        Ok(catalog)
    }

    /// Add a stop.
    pub fn add(&mut self, kind: StopKind, stop: Stop) {
        self.stops.entry(kind).or_default().push(stop);
    }

    /// All stops of one kind, in catalogue order.
    pub fn stops(&self, kind: StopKind) -> &[Stop] {
        self.stops.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Stops worth measuring a walk to from `origin`.
    ///
    /// Only stops inside `area` count. For each target id the stop closest
    /// to `origin` (straight-line) stands for the target. Sorted by id.
    pub fn candidates(
        &self,
        kind: StopKind,
        origin: LatLon,
        area: &impl RegionFilter,
    ) -> Vec<Stop> {
        self.closest_per_target(kind, origin, |stop| area.contains(&stop.location))
            .into_values()
            .map(|(_, stop)| stop.clone())
            .collect()
    }

    /// The `limit` targets nearest `origin` (straight-line), wherever they
    /// are, nearest first. One stop per target id.
    pub fn nearest(&self, kind: StopKind, origin: LatLon, limit: usize) -> Vec<Stop> {
        let mut stops: Vec<(f64, &Stop)> = self
            .closest_per_target(kind, origin, |_| true)
            .into_values()
            .collect();
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        stops
            .into_iter()
            .take(limit)
            .map(|(_, stop)| stop.clone())
            .collect()
    }

    fn closest_per_target(
        &self,
        kind: StopKind,
        origin: LatLon,
        keep: impl Fn(&Stop) -> bool,
    ) -> BTreeMap<&str, (f64, &Stop)> {
        let mut closest: BTreeMap<&str, (f64, &Stop)> = BTreeMap::new();

        for stop in self.stops(kind).iter().filter(|stop| keep(*stop)) {
            let distance = origin.haversine_m(&stop.location);
            closest
                .entry(stop.id.as_str())
                .and_modify(|best| {
                    if distance < best.0 {
                        *best = (distance, stop);
                    }
                })
                .or_insert((distance, stop));
        }

        closest
    }

    /// Total number of stops.
    pub fn len(&self) -> usize {
        self.stops.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::ServiceArea;

    const CATALOG: &str = r#"{
        "divvy": [
            {"id": "Shore Dr & 55th St", "lat": 41.7952, "lon": -87.5806},
            {"id": "Ellis Ave & 57th St", "lat": 41.7915, "lon": -87.5990}
        ],
        "cta": [
            {"id": "6", "lat": 41.7950, "lon": -87.5860},
            {"id": "6", "lat": 41.8020, "lon": -87.5900},
            {"id": "171", "lat": 41.7890, "lon": -87.5970},
            {"id": "3", "lat": 41.8781, "lon": -87.6298}
        ]
    }"#;

    fn point(lat: f64, lon: f64) -> LatLon {
        LatLon::new(lat, lon).unwrap()
    }

    #[test]
    fn parse_catalog() {
        let catalog = StopCatalog::from_json(CATALOG).unwrap();

        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.stops(StopKind::Divvy).len(), 2);
        assert_eq!(catalog.stops(StopKind::Cta).len(), 4);
        assert!(catalog.stops(StopKind::Shuttles).is_empty());
    }

    #[test]
    fn candidates_one_per_target_inside_area() {
        let catalog = StopCatalog::from_json(CATALOG).unwrap();
        let origin = point(41.7943, -87.5907);

        let stops = catalog.candidates(StopKind::Cta, origin, &ServiceArea::hyde_park());
        let ids: Vec<&str> = stops.iter().map(|s| s.id.as_str()).collect();

        // Route 3's only stop is downtown, outside the area
        assert_eq!(ids, vec!["171", "6"]);

        let route_6 = &stops[1];
        assert_eq!(route_6.location, point(41.7950, -87.5860));
    }

    #[test]
    fn candidates_follow_origin() {
        let catalog = StopCatalog::from_json(CATALOG).unwrap();
        let north = point(41.8030, -87.5905);

        let stops = catalog.candidates(StopKind::Cta, north, &ServiceArea::hyde_park());
        let route_6 = stops.iter().find(|s| s.id == "6").unwrap();
        assert_eq!(route_6.location, point(41.8020, -87.5900));
    }

    #[test]
    fn nearest_reaches_outside_area() {
        let mut catalog = StopCatalog::from_json(CATALOG).unwrap();
        catalog.add(
            StopKind::Divvy,
            Stop::new("Wacker Dr & Adams St", point(41.8794, -87.6367)),
        );
        let union_station = point(41.8789, -87.6359);

        // The downtown dock is out of the area and is not a candidate
        let in_area = catalog.candidates(StopKind::Divvy, union_station, &ServiceArea::hyde_park());
        assert!(in_area.iter().all(|s| s.id != "Wacker Dr & Adams St"));

        let stops = catalog.nearest(StopKind::Divvy, union_station, 2);
        let ids: Vec<&str> = stops.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids[0], "Wacker Dr & Adams St");
        assert_eq!(ids.len(), 2);

        assert_eq!(catalog.nearest(StopKind::Divvy, union_station, 1).len(), 1);
        assert!(catalog.nearest(StopKind::Shuttles, union_station, 3).is_empty());
    }

    #[test]
    fn invalid_coordinates_rejected() {
        let err = StopCatalog::from_json(r#"{"shuttles": [{"id": "Apostolic", "lat": 95.0, "lon": 0.0}]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            StopError::InvalidStop { kind: StopKind::Shuttles, ref id, .. } if id == "Apostolic"
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            StopCatalog::from_json("{\"divvy\": 3}"),
            Err(StopError::Json { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = StopCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.stops(StopKind::Divvy)[0].id, "Shore Dr & 55th St");

        assert!(matches!(
            StopCatalog::load("/nonexistent/stops.json"),
            Err(StopError::Io { .. })
        ));
    }

    #[test]
    fn shipped_catalog_matches_route_tables() {
        use crate::rating::{DAY_SHUTTLES, NIGHT_SHUTTLES, RouteClassifier};

        let catalog = StopCatalog::load("data/stops.json").unwrap();
        let area = ServiceArea::hyde_park();
        let classifier = RouteClassifier::default();

        for stop in catalog.stops(StopKind::Cta) {
            assert!(classifier.zones_for_id(&stop.id).is_ok(), "route {}", stop.id);
        }

        let origin = area.center();
        let shuttles = catalog.candidates(StopKind::Shuttles, origin, &area);
        for name in DAY_SHUTTLES.iter().chain(NIGHT_SHUTTLES.iter()) {
            assert!(shuttles.iter().any(|s| s.id == *name), "shuttle {name}");
        }
        assert!(!catalog.candidates(StopKind::Divvy, origin, &area).is_empty());
    }
}
