//! Domain types for the address rating engine.
//!
//! Value types shared by the engine, the providers and the web layer.
//! Types that carry invariants enforce them at construction time.

mod coords;
mod preference;
mod travel_time;
mod zone;

pub use coords::{InvalidCoordinate, LatLon, RegionFilter, ServiceArea};
pub use preference::{CtaFocus, Mode, PreferenceLevel, TransitPreferences};
pub use travel_time::{StopKind, TravelMode, TravelTimeEntry, TravelTimeMap, travel_time_map};
pub use zone::{DestinationZone, ZoneSet};
