//! Constant field: one value everywhere, no storage

use super::{ArcField, FieldLike};
use crate::dtype::Element;
use crate::error::Result;
use crate::grid::{Grid, IndexWindow, Location};
use crate::runtime::{Relocate, Runtime};
use std::sync::Arc;

/// Field returning a single constant at every cell
///
/// Backs the counting specialization of conditional reductions, where the
/// operand is replaced by a constant-one field so that summation counts
/// satisfied cells.
pub struct ConstantField<R: Runtime, T: Element> {
    value: T,
    grid: Grid<R>,
    window: IndexWindow,
    location: [Location; 3],
}

impl<R: Runtime, T: Element> ConstantField<R, T> {
    /// Constant field over the grid interior
    pub fn new(value: T, grid: &Grid<R>, location: [Location; 3]) -> Self {
        Self::with_window(value, grid, grid.interior_window(), location)
    }

    /// Constant field with an explicit window
    pub fn with_window(
        value: T,
        grid: &Grid<R>,
        window: IndexWindow,
        location: [Location; 3],
    ) -> Self {
        Self {
            value,
            grid: grid.clone(),
            window,
            location,
        }
    }

    /// Constant-one field over the grid interior
    pub fn ones(grid: &Grid<R>, location: [Location; 3]) -> Self {
        Self::new(T::one(), grid, location)
    }

    /// The constant value
    #[inline]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<R: Runtime, T: Element> FieldLike<R> for ConstantField<R, T> {
    type Elem = T;

    fn grid(&self) -> &Grid<R> {
        &self.grid
    }

    fn window(&self) -> &IndexWindow {
        &self.window
    }

    fn location(&self) -> [Location; 3] {
        self.location
    }

    #[inline]
    fn at(&self, _i: usize, _j: usize, _k: usize) -> T {
        self.value
    }

    fn relocate_dyn(&self, device: &R::Device) -> Result<ArcField<R, T>> {
        Ok(Arc::new(self.to_device(device)?))
    }

    fn summary(&self) -> String {
        format!("ConstantField<{}> = {} on {}", T::NAME, self.value, self.grid)
    }
}

impl<R: Runtime, T: Element> Clone for ConstantField<R, T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value,
            grid: self.grid.clone(),
            window: self.window.clone(),
            location: self.location,
        }
    }
}

impl<R: Runtime, T: Element> Relocate<R> for ConstantField<R, T> {
    fn to_device(&self, device: &R::Device) -> Result<Self> {
        Ok(Self {
            value: self.value,
            grid: self.grid.to_device(device)?,
            window: self.window.clone(),
            location: self.location,
        })
    }
}
