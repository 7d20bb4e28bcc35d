//! Error types for maskr

use thiserror::Error;

/// Result type alias using maskr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or driving conditional operations
///
/// All failures are synchronous and surfaced to the caller before any write
/// occurs; nothing is retried internally. In-window access during elementwise
/// evaluation is deliberately unchecked in release builds (the hot path adds
/// `debug_assert!` bounds checks only).
#[derive(Error, Debug)]
pub enum Error {
    /// Two values that must share a structured grid do not
    #[error("Grid mismatch: grid {lhs} vs grid {rhs}")]
    GridMismatch {
        /// Grid id on the left-hand side
        lhs: u64,
        /// Grid id on the right-hand side
        rhs: u64,
    },

    /// A dense-mask condition does not cover the grid's full indexable extent
    #[error("Condition shape mismatch: mask has {got} cells, grid extent (including halo) requires {expected}")]
    ConditionShapeMismatch {
        /// Cell count the grid requires
        expected: usize,
        /// Cell count the mask provides
        got: usize,
    },

    /// A fill value cannot be represented in the operand's element type
    #[error("Type incompatibility: fill value {value} is not representable as {dtype}")]
    TypeIncompatibility {
        /// The offending scalar
        value: f64,
        /// Name of the target element type
        dtype: &'static str,
    },

    /// Storage length does not match the expected cell count
    #[error("Shape mismatch: expected {expected} elements, got {got}")]
    ShapeMismatch {
        /// Expected element count
        expected: usize,
        /// Actual element count
        got: usize,
    },

    /// Grid-location tags differ where they must agree
    #[error("Location mismatch: expected {expected}, got {got}")]
    LocationMismatch {
        /// Expected location triple, rendered as e.g. "(C, C, F)"
        expected: String,
        /// Actual location triple
        got: String,
    },

    /// Invalid reduction axis
    #[error("Invalid axis {axis} for a 3-axis grid")]
    InvalidAxis {
        /// The offending axis index
        axis: usize,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },
}

impl Error {
    /// Create a grid mismatch error from two grid ids
    pub fn grid_mismatch(lhs: u64, rhs: u64) -> Self {
        Self::GridMismatch { lhs, rhs }
    }

    /// Create a condition shape mismatch error
    pub fn condition_shape(expected: usize, got: usize) -> Self {
        Self::ConditionShapeMismatch { expected, got }
    }

    /// Create a type incompatibility error
    pub fn type_incompatibility(value: f64, dtype: &'static str) -> Self {
        Self::TypeIncompatibility { value, dtype }
    }

    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: usize, got: usize) -> Self {
        Self::ShapeMismatch { expected, got }
    }
}
