//! Transit stop catalogue.
//!
//! Divvy stations, campus shuttle stops and CTA bus stops with their
//! coordinates, loaded from a JSON file at startup. The live provider uses
//! it to pick which stops to measure walking times to.

mod catalog;
mod error;

pub use catalog::{Stop, StopCatalog};
pub use error::StopError;
