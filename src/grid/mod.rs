//! Structured grid topology, cell locations, and index windows

mod core;
mod location;
mod window;

pub use self::core::{Grid, GridId};
pub use location::Location;
pub use window::{AxisRange, IndexWindow};
