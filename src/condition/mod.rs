//! Conditions: predicate functions and dense boolean masks
//!
//! A condition decides, per grid cell, whether a conditional node applies its
//! transform or substitutes its fill value. Exactly two shapes are legal - a
//! predicate over grid coordinates, or a dense mask sized to the grid's full
//! indexable extent - resolved through a single tagged dispatch at access
//! time.

mod mask;

pub use mask::Mask;

use crate::grid::Grid;
use crate::runtime::Runtime;
use std::fmt;
use std::sync::Arc;

/// Predicate over grid coordinates
///
/// Stateless with respect to relocation: any capture must itself be valid in
/// every memory domain, so predicates are carried across relocation as-is.
pub type Predicate<R> = Arc<dyn Fn(usize, usize, usize, &Grid<R>) -> bool + Send + Sync>;

/// Per-cell condition, in one of its two legal shapes
pub enum Condition<R: Runtime> {
    /// Boolean function of the cell coordinate and grid
    Predicate(Predicate<R>),
    /// Dense boolean mask over the grid's full indexable extent
    Mask(Mask<R>),
}

impl<R: Runtime> Condition<R> {
    /// The always-true predicate (the default condition)
    pub fn always() -> Self {
        Condition::Predicate(Arc::new(|_, _, _, _| true))
    }

    /// Wrap a predicate function
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(usize, usize, usize, &Grid<R>) -> bool + Send + Sync + 'static,
    {
        Condition::Predicate(Arc::new(f))
    }

    /// Whether the condition holds at cell `(i, j, k)`
    ///
    /// Mask lookups are direct bounded reads with no bounds adjustment; the
    /// caller's index window guarantees in-range access.
    #[inline]
    pub fn holds(&self, i: usize, j: usize, k: usize, grid: &Grid<R>) -> bool {
        match self {
            Condition::Predicate(f) => f(i, j, k, grid),
            Condition::Mask(m) => m.at(i, j, k),
        }
    }
}

impl<R: Runtime> Clone for Condition<R> {
    fn clone(&self) -> Self {
        match self {
            Condition::Predicate(f) => Condition::Predicate(Arc::clone(f)),
            Condition::Mask(m) => Condition::Mask(m.clone()),
        }
    }
}

impl<R: Runtime> fmt::Display for Condition<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Predicate(_) => write!(f, "predicate"),
            Condition::Mask(m) => write!(f, "mask ({} true cells)", m.count_true()),
        }
    }
}
