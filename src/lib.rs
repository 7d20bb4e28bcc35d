//! # maskr
//!
//! **Lazy conditional masking for structured-grid field computations.**
//!
//! maskr provides the conditional-masking node of a field-operation algebra:
//! a lazy value that describes, without performing, the elementwise
//! computation "apply a transform to a field value if a condition holds at
//! that grid cell, otherwise substitute a fill value".
//!
//! ## Design
//!
//! - **Lazy**: a [`ConditionalOp`](ops::ConditionalOp) never owns simulation
//!   state. It references an operand field and evaluates per cell on demand,
//!   with no caching - repeated reads recompute.
//! - **Protocol-uniform**: the node satisfies the same [`FieldLike`](field::FieldLike)
//!   contract as a concrete field, so reductions and materialization do not
//!   distinguish lazy from stored data.
//! - **Dual conditions**: a condition is either a predicate over grid
//!   coordinates or a dense boolean mask sized to the grid, resolved at
//!   access time through a single tagged dispatch.
//! - **Relocatable**: every constituent (operand, grid, mask, fill) supports
//!   the [`Relocate`](runtime::Relocate) contract, so the same logical
//!   computation can be re-homed to a target memory domain and run inside an
//!   accelerated kernel.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use maskr::prelude::*;
//!
//! let device = CpuDevice::new();
//! let grid = Grid::<CpuRuntime>::new([4, 4, 1], 0, &device);
//! let field = Field::from_slice(&grid, Location::CENTERED, &data)?;
//!
//! let masked = conditional(field)
//!     .with_transform(|v: f64| v * v)
//!     .with_fill(0.0);
//!
//! let energy = maskr::ops::sum(&masked);
//! let active = masked.count();
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): multi-threaded reductions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod condition;
pub mod dtype;
pub mod error;
pub mod field;
pub mod grid;
pub mod ops;
pub mod runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::condition::{Condition, Mask};
    pub use crate::dtype::Element;
    pub use crate::error::{Error, Result};
    pub use crate::field::{ConstantField, Field, FieldLike};
    pub use crate::grid::{Grid, IndexWindow, Location};
    pub use crate::ops::{conditional, ConditionalOp};
    pub use crate::runtime::cpu::{CpuDevice, CpuRuntime};
    pub use crate::runtime::{Device, Relocate, Runtime};
}

/// Default runtime for hosts without an accelerator backend
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
