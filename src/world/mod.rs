//! The location graph: locations, travel edges and encounter tables.
//!
//! Locations are static configuration built once at startup. Travel times
//! are looked up in either direction, and each location may carry a
//! weighted table of enemies that can be encountered there.

mod data;
mod graph;
mod location;

pub use data::default_locations;
pub use graph::{IntegrityIssue, LocationGraph, TravelTime};
pub use location::{Action, Encounter, Location};
