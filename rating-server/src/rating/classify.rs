//! CTA route classification by destination zone.

use std::collections::BTreeMap;

use crate::domain::DestinationZone::{Downtown, HydePark, SouthSide, UChicago};
use crate::domain::{DestinationZone, ZoneSet};

use super::error::LookupError;

/// Zones served by each CTA bus route near Hyde Park.
pub const CTA_ROUTES: &[(u32, ZoneSet)] = &[
    (2, ZoneSet::of_all(&[Downtown, HydePark])),
    (3, ZoneSet::of_all(&[Downtown, SouthSide])),
    (4, ZoneSet::of_all(&[Downtown, SouthSide])),
    (6, ZoneSet::of_all(&[Downtown, HydePark, SouthSide])),
    (15, ZoneSet::of_all(&[HydePark, SouthSide])),
    (28, ZoneSet::of_all(&[HydePark, SouthSide])),
    (29, ZoneSet::of_all(&[Downtown, SouthSide])),
    (30, ZoneSet::of(SouthSide)),
    (47, ZoneSet::of(HydePark)),
    (55, ZoneSet::of_all(&[HydePark, SouthSide])),
    (59, ZoneSet::of(SouthSide)),
    (63, ZoneSet::of(SouthSide)),
    (67, ZoneSet::of(SouthSide)),
    (71, ZoneSet::of(SouthSide)),
    (95, ZoneSet::EMPTY),
    (169, ZoneSet::EMPTY),
    (171, ZoneSet::of(UChicago)),
    (172, ZoneSet::of(UChicago)),
    (192, ZoneSet::of(Downtown)),
];

/// Immutable route → zone lookup.
///
/// Built once at start-up and shared read-only. Every route the provider can
/// return must be present; an unknown route is a [`LookupError`].
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    routes: BTreeMap<u32, ZoneSet>,
}

impl RouteClassifier {
    /// Build a classifier from an explicit table.
    pub fn new(routes: impl IntoIterator<Item = (u32, ZoneSet)>) -> Self {
        Self {
            routes: routes.into_iter().collect(),
        }
    }

    /// The zones served by `route`.
    pub fn zones(&self, route: u32) -> Result<ZoneSet, LookupError> {
        self.routes
            .get(&route)
            .copied()
            .ok_or(LookupError::UnknownRoute(route))
    }

    /// Whether `route` serves `zone`.
    pub fn serves(&self, route: u32, zone: DestinationZone) -> Result<bool, LookupError> {
        Ok(self.zones(route)?.contains(zone))
    }

    /// Zones served by a provider target id (a route number as text).
    pub fn zones_for_id(&self, target_id: &str) -> Result<ZoneSet, LookupError> {
        let route = target_id
            .trim()
            .parse::<u32>()
            .map_err(|_| LookupError::InvalidRouteId(target_id.to_string()))?;
        self.zones(route)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteClassifier {
    fn default() -> Self {
        Self::new(CTA_ROUTES.iter().copied())
    }
}
