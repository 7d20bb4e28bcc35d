//! The field-like protocol every operation node satisfies

use crate::dtype::Element;
use crate::error::Result;
use crate::grid::{Grid, IndexWindow, Location};
use crate::runtime::Runtime;
use std::sync::Arc;

/// Shared handle to any field-like value
pub type ArcField<R, T> = Arc<dyn FieldLike<R, Elem = T>>;

/// Elementwise-readable value defined over a structured grid
///
/// This is the protocol contract of the operation algebra: concrete fields,
/// constant fields, and lazy operation nodes all expose the same surface, so
/// reductions and materialization never distinguish stored from computed
/// data.
///
/// `at` must be pure and side-effect-free: safe to invoke concurrently and
/// redundantly from any number of evaluators, with no ordering dependency
/// between cells.
pub trait FieldLike<R: Runtime>: Send + Sync + 'static {
    /// Element type of this field
    type Elem: Element;

    /// The structured grid this field is defined on
    fn grid(&self) -> &Grid<R>;

    /// The active index window
    fn window(&self) -> &IndexWindow;

    /// Grid-cell location tags, one per axis
    fn location(&self) -> [Location; 3];

    /// Elementwise read at cell `(i, j, k)`
    ///
    /// Callers must guarantee in-window access; bounds are only asserted in
    /// debug builds.
    fn at(&self, i: usize, j: usize, k: usize) -> Self::Elem;

    /// Object-safe relocation to a target memory domain
    fn relocate_dyn(&self, device: &R::Device) -> Result<ArcField<R, Self::Elem>>;

    /// One-line diagnostic summary
    fn summary(&self) -> String;
}

impl<R: Runtime, T: Element> FieldLike<R> for ArcField<R, T> {
    type Elem = T;

    fn grid(&self) -> &Grid<R> {
        (**self).grid()
    }

    fn window(&self) -> &IndexWindow {
        (**self).window()
    }

    fn location(&self) -> [Location; 3] {
        (**self).location()
    }

    #[inline]
    fn at(&self, i: usize, j: usize, k: usize) -> T {
        (**self).at(i, j, k)
    }

    fn relocate_dyn(&self, device: &R::Device) -> Result<ArcField<R, T>> {
        (**self).relocate_dyn(device)
    }

    fn summary(&self) -> String {
        (**self).summary()
    }
}
