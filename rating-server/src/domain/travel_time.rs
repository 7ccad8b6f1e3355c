//! Travel-time measurements produced by the provider.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{LatLon, Mode};

/// The kinds of stop the provider can search around a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    /// CTA bus stops, identified by route number.
    Cta,
    /// Divvy bike-share stations, identified by station name.
    Divvy,
    /// Campus shuttle stops, identified by route name.
    Shuttles,
}

impl StopKind {
    pub const ALL: [StopKind; 3] = [StopKind::Cta, StopKind::Divvy, StopKind::Shuttles];

    pub fn as_str(self) -> &'static str {
        match self {
            StopKind::Cta => "cta",
            StopKind::Divvy => "divvy",
            StopKind::Shuttles => "shuttles",
        }
    }

    /// The preference that governs this kind of stop.
    pub fn mode(self) -> Mode {
        match self {
            StopKind::Cta => Mode::Cta,
            StopKind::Divvy => Mode::Bicycling,
            StopKind::Shuttles => Mode::Shuttles,
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing modes understood by the distance provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walking,
    Driving,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel time from an origin to one target (a stop, station or route).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelTimeEntry {
    pub target_id: String,
    pub time_seconds: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<LatLon>,
}

impl TravelTimeEntry {
    pub fn new(target_id: impl Into<String>, time_seconds: f64) -> Self {
        Self {
            target_id: target_id.into(),
            time_seconds,
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: LatLon) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}

/// Travel times keyed by target id.
///
/// A `BTreeMap` so iteration order (and therefore nearest-neighbour
/// tie-breaking) is deterministic.
pub type TravelTimeMap = BTreeMap<String, TravelTimeEntry>;

/// Build a [`TravelTimeMap`] from `(id, seconds)` pairs.
pub fn travel_time_map<'a>(entries: impl IntoIterator<Item = (&'a str, f64)>) -> TravelTimeMap {
    entries
        .into_iter()
        .map(|(id, secs)| (id.to_string(), TravelTimeEntry::new(id, secs)))
        .collect()
}
