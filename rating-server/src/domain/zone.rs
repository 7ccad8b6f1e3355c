//! Destination zones used to bucket CTA routes.

use std::fmt;

/// A destination category a CTA route can serve.
///
/// Each zone owns a distinct bit so that a route's coverage can be stored as
/// a [`ZoneSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationZone {
    HydePark,
    Downtown,
    SouthSide,
    UChicago,
}

impl DestinationZone {
    pub const ALL: [DestinationZone; 4] = [
        DestinationZone::HydePark,
        DestinationZone::Downtown,
        DestinationZone::SouthSide,
        DestinationZone::UChicago,
    ];

    pub const fn bit(self) -> u8 {
        match self {
            DestinationZone::HydePark => 1,
            DestinationZone::Downtown => 2,
            DestinationZone::SouthSide => 4,
            DestinationZone::UChicago => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DestinationZone::HydePark => "hyde_park",
            DestinationZone::Downtown => "downtown",
            DestinationZone::SouthSide => "south_side",
            DestinationZone::UChicago => "uchicago",
        }
    }
}

impl fmt::Display for DestinationZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bitmask over [`DestinationZone`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ZoneSet(u8);

impl ZoneSet {
    pub const EMPTY: ZoneSet = ZoneSet(0);

    pub const fn of(zone: DestinationZone) -> Self {
        ZoneSet(zone.bit())
    }

    /// The set of every zone in `zones`.
    pub const fn of_all(zones: &[DestinationZone]) -> Self {
        let mut bits = 0;
        let mut idx = 0;
        while idx < zones.len() {
            bits |= zones[idx].bit();
            idx += 1;
        }
        ZoneSet(bits)
    }

    pub const fn contains(self, zone: DestinationZone) -> bool {
        self.0 & zone.bit() != 0
    }
}
