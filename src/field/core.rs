//! Concrete field: grid-shaped storage plus location tags

use super::{ArcField, FieldLike, Storage};
use crate::dtype::Element;
use crate::error::Result;
use crate::grid::{Grid, IndexWindow, Location};
use crate::runtime::{Device, Relocate, Runtime};
use std::sync::Arc;

/// Field with concrete storage over a grid's full indexable extent
///
/// The buffer covers every cell including the halo region; the active window
/// is the grid interior. Cloning shares storage zero-copy.
pub struct Field<R: Runtime, T: Element> {
    storage: Storage<R, T>,
    grid: Grid<R>,
    window: IndexWindow,
    location: [Location; 3],
}

impl<R: Runtime, T: Element> Field<R, T> {
    /// Allocate a zero-filled field on the grid's device
    pub fn zeros(grid: &Grid<R>, location: [Location; 3]) -> Result<Self> {
        let storage = Storage::new(grid.total_len(), grid.device())?;
        Ok(Self {
            storage,
            grid: grid.clone(),
            window: grid.interior_window(),
            location,
        })
    }

    /// Create a field from row-major data covering the full extent
    ///
    /// `data` must hold exactly one element per indexable cell, halo
    /// included.
    pub fn from_slice(grid: &Grid<R>, location: [Location; 3], data: &[T]) -> Result<Self> {
        let expected = grid.total_len();
        if data.len() != expected {
            return Err(crate::error::Error::shape_mismatch(expected, data.len()));
        }
        let storage = Storage::from_slice(data, grid.device())?;
        Ok(Self {
            storage,
            grid: grid.clone(),
            window: grid.interior_window(),
            location,
        })
    }

    /// Allocate a zero-filled field shaped like `other`
    ///
    /// The storage-allocation collaborator used by allocating
    /// materialization: same grid, same location tags, fresh zeroed storage.
    pub fn zeros_like<F: FieldLike<R, Elem = T>>(other: &F) -> Result<Self> {
        Self::zeros(other.grid(), other.location())
    }

    /// Read the value at cell `(i, j, k)`
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> T {
        debug_assert!(self.grid.contains(i, j, k), "field read out of extent");
        self.storage.read(self.grid.linear_index(i, j, k))
    }

    /// Write the value at cell `(i, j, k)`
    ///
    /// Requires exclusive access; concurrent writers are the caller's
    /// responsibility to exclude.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: T) {
        debug_assert!(self.grid.contains(i, j, k), "field write out of extent");
        self.storage.write(self.grid.linear_index(i, j, k), value);
    }

    /// The underlying storage
    #[inline]
    pub fn storage(&self) -> &Storage<R, T> {
        &self.storage
    }

    /// Copy the full extent to a host `Vec`, row-major
    pub fn to_vec(&self) -> Vec<T> {
        self.storage.to_vec()
    }
}

impl<R: Runtime, T: Element> FieldLike<R> for Field<R, T> {
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
    fn at(&self, i: usize, j: usize, k: usize) -> T {
        self.get(i, j, k)
    }

    fn relocate_dyn(&self, device: &R::Device) -> Result<ArcField<R, T>> {
        Ok(Arc::new(self.to_device(device)?))
    }

    fn summary(&self) -> String {
        format!(
            "Field<{}> at {} on {}",
            T::NAME,
            Location::triple(&self.location),
            self.grid
        )
    }
}

impl<R: Runtime, T: Element> Clone for Field<R, T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            grid: self.grid.clone(),
            window: self.window.clone(),
            location: self.location,
        }
    }
}

impl<R: Runtime, T: Element> Relocate<R> for Field<R, T> {
    fn to_device(&self, device: &R::Device) -> Result<Self> {
        log::debug!("relocating {} to {:?}", self.summary(), device.id());
        Ok(Self {
            storage: self.storage.to_device(device)?,
            grid: self.grid.to_device(device)?,
            window: self.window.clone(),
            location: self.location,
        })
    }
}

impl<R: Runtime, T: Element> std::fmt::Debug for Field<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("grid", &self.grid)
            .field("location", &Location::triple(&self.location))
            .field("window", &self.window)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_from_slice_and_get() {
        let device = CpuDevice::new();
        let grid = Grid::<CpuRuntime>::new([2, 2, 1], 0, &device);
        let field =
            Field::from_slice(&grid, Location::CENTERED, &[1.0, 2.0, 3.0, 4.0]).unwrap();

        assert_eq!(field.get(0, 0, 0), 1.0);
        assert_eq!(field.get(0, 1, 0), 2.0);
        assert_eq!(field.get(1, 0, 0), 3.0);
        assert_eq!(field.get(1, 1, 0), 4.0);
    }

    #[test]
    fn test_from_slice_requires_full_extent() {
        let device = CpuDevice::new();
        let grid = Grid::<CpuRuntime>::new([2, 2, 1], 1, &device);

        // 2x2x1 with halo 1 indexes 4x4x3 cells
        let err = Field::<_, f64>::from_slice(&grid, Location::CENTERED, &[0.0; 4]);
        assert!(matches!(
            err,
            Err(crate::error::Error::ShapeMismatch { expected: 48, got: 4 })
        ));
    }

    #[test]
    fn test_set_then_get() {
        let device = CpuDevice::new();
        let grid = Grid::<CpuRuntime>::new([2, 1, 1], 0, &device);
        let mut field = Field::<_, i64>::zeros(&grid, Location::CENTERED).unwrap();

        field.set(1, 0, 0, 42);
        assert_eq!(field.get(1, 0, 0), 42);
        assert_eq!(field.get(0, 0, 0), 0);
    }
}
