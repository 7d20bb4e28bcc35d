//! Dense boolean masks over a grid's full indexable extent

use crate::error::{Error, Result};
use crate::field::Storage;
use crate::grid::Grid;
use crate::runtime::{Relocate, Runtime};

/// Dense boolean mask covering every indexable cell of a grid, halo included
///
/// Stored as one `u8` per cell so the buffer can live in any memory domain.
/// Shape is validated at construction: presenting a mask that does not cover
/// the grid's full extent is an error, never a truncation.
pub struct Mask<R: Runtime> {
    storage: Storage<R, u8>,
    grid: Grid<R>,
}

impl<R: Runtime> Mask<R> {
    /// Build a mask from row-major flags covering the grid's full extent
    pub fn from_slice(grid: &Grid<R>, flags: &[bool]) -> Result<Self> {
        let expected = grid.total_len();
        if flags.len() != expected {
            return Err(Error::condition_shape(expected, flags.len()));
        }
        let bytes: Vec<u8> = flags.iter().map(|&b| b as u8).collect();
        let storage = Storage::from_slice(&bytes, grid.device())?;
        Ok(Self {
            storage,
            grid: grid.clone(),
        })
    }

    /// Build a mask by evaluating `f` at every indexable cell
    pub fn from_fn<F>(grid: &Grid<R>, f: F) -> Result<Self>
    where
        F: Fn(usize, usize, usize) -> bool,
    {
        let [ti, tj, tk] = grid.total_extents();
        let mut flags = Vec::with_capacity(grid.total_len());
        for i in 0..ti {
            for j in 0..tj {
                for k in 0..tk {
                    flags.push(f(i, j, k));
                }
            }
        }
        Self::from_slice(grid, &flags)
    }

    /// The grid this mask is sized to
    #[inline]
    pub fn grid(&self) -> &Grid<R> {
        &self.grid
    }

    /// Direct bounded lookup, no bounds adjustment
    #[inline]
    pub fn at(&self, i: usize, j: usize, k: usize) -> bool {
        debug_assert!(self.grid.contains(i, j, k), "mask read out of extent");
        self.storage.read(self.grid.linear_index(i, j, k)) != 0
    }

    /// Number of true cells over the full extent
    pub fn count_true(&self) -> usize {
        self.storage.to_vec().iter().filter(|&&b| b != 0).count()
    }
}

impl<R: Runtime> Clone for Mask<R> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            grid: self.grid.clone(),
        }
    }
}

impl<R: Runtime> Relocate<R> for Mask<R> {
    fn to_device(&self, device: &R::Device) -> Result<Self> {
        Ok(Self {
            storage: self.storage.to_device(device)?,
            grid: self.grid.to_device(device)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_from_slice_validates_shape() {
        let device = CpuDevice::new();
        let grid = Grid::<CpuRuntime>::new([2, 1, 1], 0, &device);

        assert!(Mask::from_slice(&grid, &[true, false]).is_ok());
        let err = Mask::from_slice(&grid, &[true]);
        assert!(matches!(
            err,
            Err(Error::ConditionShapeMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_lookup_and_count() {
        let device = CpuDevice::new();
        let grid = Grid::<CpuRuntime>::new([2, 2, 1], 0, &device);
        let mask = Mask::from_fn(&grid, |i, j, _| i == j).unwrap();

        assert!(mask.at(0, 0, 0));
        assert!(mask.at(1, 1, 0));
        assert!(!mask.at(0, 1, 0));
        assert_eq!(mask.count_true(), 2);
    }

    #[test]
    fn test_mask_covers_halo() {
        let device = CpuDevice::new();
        let grid = Grid::<CpuRuntime>::new([1, 1, 1], 1, &device);
        // full extent is 3x3x3
        let mask = Mask::from_fn(&grid, |i, j, k| (i, j, k) == (1, 1, 1)).unwrap();

        assert!(mask.at(1, 1, 1));
        assert!(!mask.at(0, 0, 0));
        assert_eq!(mask.count_true(), 1);
    }
}
