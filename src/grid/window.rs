//! Index windows: the active sub-range of grid indices a field is defined
//! over

use std::fmt;
use std::ops::Range;

/// Active range along one grid axis
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisRange {
    /// The axis's entire indexable extent
    Full,
    /// An explicit sub-range of indices
    Sub(Range<usize>),
}

impl AxisRange {
    /// Resolve to a concrete index range given the axis's full extent
    #[inline]
    pub fn resolve(&self, total: usize) -> Range<usize> {
        match self {
            AxisRange::Full => 0..total,
            AxisRange::Sub(r) => r.clone(),
        }
    }

    /// Number of indices in this range given the axis's full extent
    #[inline]
    pub fn len(&self, total: usize) -> usize {
        let r = self.resolve(total);
        r.end.saturating_sub(r.start)
    }

    /// Whether the range covers the unrestricted full extent
    #[inline]
    pub fn is_full(&self) -> bool {
        matches!(self, AxisRange::Full)
    }
}

/// The active index range per axis
///
/// A window is always derived from a field at construction time, never
/// user-supplied directly. It either covers an axis's full indexable extent
/// or names an explicit sub-range (e.g. a grid interior excluding halo).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexWindow {
    axes: [AxisRange; 3],
}

impl IndexWindow {
    /// Window covering the full extent along every axis
    pub fn full() -> Self {
        Self {
            axes: [AxisRange::Full, AxisRange::Full, AxisRange::Full],
        }
    }

    /// Window with an explicit range per axis
    pub fn new(axes: [AxisRange; 3]) -> Self {
        Self { axes }
    }

    /// The range along one axis
    #[inline]
    pub fn axis(&self, axis: usize) -> &AxisRange {
        &self.axes[axis]
    }

    /// Resolve every axis against the given full extents
    #[inline]
    pub fn resolve(&self, totals: [usize; 3]) -> [Range<usize>; 3] {
        [
            self.axes[0].resolve(totals[0]),
            self.axes[1].resolve(totals[1]),
            self.axes[2].resolve(totals[2]),
        ]
    }

    /// Whether `(i, j, k)` lies inside the window
    #[inline]
    pub fn contains(&self, i: usize, j: usize, k: usize, totals: [usize; 3]) -> bool {
        let [ri, rj, rk] = self.resolve(totals);
        ri.contains(&i) && rj.contains(&j) && rk.contains(&k)
    }

    /// Total number of cells in the window
    pub fn len(&self, totals: [usize; 3]) -> usize {
        self.axes[0].len(totals[0]) * self.axes[1].len(totals[1]) * self.axes[2].len(totals[2])
    }

    /// Whether the window contains no cells
    pub fn is_empty(&self, totals: [usize; 3]) -> bool {
        self.len(totals) == 0
    }
}

impl fmt::Display for IndexWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_axis = |a: &AxisRange| match a {
            AxisRange::Full => "full".to_string(),
            AxisRange::Sub(r) => format!("{}..{}", r.start, r.end),
        };
        write!(
            f,
            "[{}, {}, {}]",
            fmt_axis(&self.axes[0]),
            fmt_axis(&self.axes[1]),
            fmt_axis(&self.axes[2])
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_resolves_to_total_extent() {
        let w = IndexWindow::full();
        assert_eq!(w.resolve([4, 3, 2]), [0..4, 0..3, 0..2]);
        assert_eq!(w.len([4, 3, 2]), 24);
    }

    #[test]
    fn test_sub_range_is_verbatim() {
        let w = IndexWindow::new([
            AxisRange::Sub(1..3),
            AxisRange::Full,
            AxisRange::Sub(0..1),
        ]);
        assert_eq!(w.resolve([6, 5, 4]), [1..3, 0..5, 0..1]);
        assert_eq!(w.len([6, 5, 4]), 2 * 5 * 1);
    }

    #[test]
    fn test_contains() {
        let w = IndexWindow::new([AxisRange::Sub(1..3), AxisRange::Full, AxisRange::Full]);
        assert!(w.contains(1, 0, 0, [4, 1, 1]));
        assert!(w.contains(2, 0, 0, [4, 1, 1]));
        assert!(!w.contains(0, 0, 0, [4, 1, 1]));
        assert!(!w.contains(3, 0, 0, [4, 1, 1]));
    }
}
