//! Structured grid: topology shared by every field in a computation

use super::{AxisRange, IndexWindow};
use crate::error::Result;
use crate::runtime::{Device, Relocate, Runtime};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Global counter for unique grid ids
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a grid's topology
///
/// Structural grid identity: two grid handles are the same grid iff their
/// ids match. The id survives relocation, so a device-resident copy of a
/// grid still compares identical to its host original.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridId(u64);

impl GridId {
    /// Create a new unique grid id
    #[inline]
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw id value
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for GridId {
    fn default() -> Self {
        Self::new()
    }
}

struct GridInner {
    id: GridId,
    /// Interior extent per axis, excluding halo
    extent: [usize; 3],
    /// Uniform halo width on both sides of every axis
    halo: usize,
}

/// Three-axis structured grid with a halo region
///
/// The topology (extent + halo) is `Arc`-shared; a `Grid` handle additionally
/// carries the memory domain its associated field data lives in. Cloning is
/// cheap and relocation re-tags the device without copying topology.
///
/// Indices run over the *full* indexable extent `extent + 2 * halo` per axis,
/// zero-based; the interior occupies `halo..halo + extent`.
pub struct Grid<R: Runtime> {
    inner: Arc<GridInner>,
    device: R::Device,
}

impl<R: Runtime> Grid<R> {
    /// Create a grid with the given interior extent and halo width
    pub fn new(extent: [usize; 3], halo: usize, device: &R::Device) -> Self {
        Self {
            inner: Arc::new(GridInner {
                id: GridId::new(),
                extent,
                halo,
            }),
            device: device.clone(),
        }
    }

    /// This grid's structural identity
    #[inline]
    pub fn id(&self) -> GridId {
        self.inner.id
    }

    /// Whether `other` is structurally the same grid
    #[inline]
    pub fn same_grid(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }

    /// Interior extent along one axis, excluding halo
    #[inline]
    pub fn extent(&self, axis: usize) -> usize {
        self.inner.extent[axis]
    }

    /// Halo width
    #[inline]
    pub fn halo(&self) -> usize {
        self.inner.halo
    }

    /// Full indexable extent along one axis, including halo on both sides
    #[inline]
    pub fn total_extent(&self, axis: usize) -> usize {
        self.inner.extent[axis] + 2 * self.inner.halo
    }

    /// Full indexable extents for all three axes
    #[inline]
    pub fn total_extents(&self) -> [usize; 3] {
        [
            self.total_extent(0),
            self.total_extent(1),
            self.total_extent(2),
        ]
    }

    /// Total number of indexable cells, including halo
    #[inline]
    pub fn total_len(&self) -> usize {
        self.total_extent(0) * self.total_extent(1) * self.total_extent(2)
    }

    /// Row-major linear index of cell `(i, j, k)` over the full extent
    #[inline]
    pub fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.total_extent(1) + j) * self.total_extent(2) + k
    }

    /// Whether `(i, j, k)` is inside the full indexable extent
    #[inline]
    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.total_extent(0) && j < self.total_extent(1) && k < self.total_extent(2)
    }

    /// Window covering the interior (full extent when there is no halo)
    pub fn interior_window(&self) -> IndexWindow {
        if self.inner.halo == 0 {
            return IndexWindow::full();
        }
        let h = self.inner.halo;
        IndexWindow::new([
            AxisRange::Sub(h..h + self.inner.extent[0]),
            AxisRange::Sub(h..h + self.inner.extent[1]),
            AxisRange::Sub(h..h + self.inner.extent[2]),
        ])
    }

    /// The memory domain this grid's field data lives in
    #[inline]
    pub fn device(&self) -> &R::Device {
        &self.device
    }
}

impl<R: Runtime> Clone for Grid<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            device: self.device.clone(),
        }
    }
}

impl<R: Runtime> Relocate<R> for Grid<R> {
    /// Re-tag the grid with a new memory domain, sharing topology
    fn to_device(&self, device: &R::Device) -> Result<Self> {
        Ok(Self {
            inner: Arc::clone(&self.inner),
            device: device.clone(),
        })
    }
}

impl<R: Runtime> fmt::Debug for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("id", &self.inner.id.raw())
            .field("extent", &self.inner.extent)
            .field("halo", &self.inner.halo)
            .field("device", &self.device.name())
            .finish()
    }
}

impl<R: Runtime> fmt::Display for Grid<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{} grid (halo {}) on {}",
            self.inner.extent[0],
            self.inner.extent[1],
            self.inner.extent[2],
            self.inner.halo,
            self.device.name()
        )
    }
}
