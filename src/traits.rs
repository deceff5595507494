//! Core seams of the dispatch engine.
//!
//! Anything that maps place names to coordinates can back the engine: the
//! built-in gazetteer, a database, or a synthetic table in tests.

use std::collections::HashMap;

use crate::model::Coordinate;

/// Resolves a place name to a coordinate.
///
/// `None` means the place is unknown. It is never an error: whatever owns the
/// name is simply left out of pairwise distance evaluation.
pub trait LocationResolver {
    fn resolve(&self, name: &str) -> Option<Coordinate>;
}

impl LocationResolver for HashMap<String, Coordinate> {
    fn resolve(&self, name: &str) -> Option<Coordinate> {
        self.get(name).copied()
    }
}
