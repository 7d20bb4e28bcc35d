//! Grid-cell location tags

use std::fmt;

/// Where on a grid cell a quantity is defined, per axis
///
/// A field carries one tag per axis, fixed at construction. The triple is
/// part of a node's static identity and is never mutated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Location {
    /// Cell center
    Center,
    /// Cell face
    Face,
}

impl Location {
    /// The fully cell-centered location triple
    pub const CENTERED: [Location; 3] = [Location::Center; 3];

    /// Render a location triple as e.g. `(C, C, F)`
    pub fn triple(loc: &[Location; 3]) -> String {
        format!("({}, {}, {})", loc[0], loc[1], loc[2])
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Center => write!(f, "C"),
            Location::Face => write!(f, "F"),
        }
    }
}
