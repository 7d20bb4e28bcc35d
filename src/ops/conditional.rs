//! The lazy conditional-masking node

use crate::condition::{Condition, Mask};
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::field::{ArcField, ConstantField, Field, FieldLike};
use crate::grid::{Grid, IndexWindow, Location};
use crate::runtime::{Device, Relocate, Runtime};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Pure unary transform applied to each satisfied operand value
pub type Transform<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// Build a conditional node over `operand` with default parameters
///
/// Defaults: identity transform, always-true condition, zero fill. The grid,
/// index window, and location tags are derived from the operand; re-derive
/// nothing, override with the `with_*` builders.
pub fn conditional<R, F>(operand: F) -> ConditionalOp<R, F::Elem>
where
    R: Runtime,
    F: FieldLike<R>,
{
    ConditionalOp::new(Arc::new(operand))
}

/// Lazy node computing `condition(i, j, k) ? transform(operand[i, j, k]) :
/// fill` per cell
///
/// The node is an immutable, cheaply-clonable value. It never owns
/// simulation state: the operand's storage is shared, evaluation is pure and
/// uncached, and only the materialization drivers perform writes. Every
/// parameter change goes through a copy-with-override builder; a node is
/// never mutated in place, so concurrent sharing is safe by construction.
///
/// Overriding replaces, never composes: supplying a new transform discards
/// the previous one, keeping the node flattened to a single
/// transform/condition/fill triple. Re-parameterizing an already-conditioned
/// node with `with_transform` or `with_fill` preserves its condition
/// verbatim.
pub struct ConditionalOp<R: Runtime, T: Element> {
    operand: ArcField<R, T>,
    /// `None` is the identity transform
    transform: Option<Transform<T>>,
    grid: Grid<R>,
    window: IndexWindow,
    condition: Condition<R>,
    fill: T,
    location: [Location; 3],
}

impl<R: Runtime, T: Element> ConditionalOp<R, T> {
    /// Build a node over a shared operand with default parameters
    pub fn new(operand: ArcField<R, T>) -> Self {
        let grid = operand.grid().clone();
        let window = operand.window().clone();
        let location = operand.location();
        Self {
            operand,
            transform: None,
            grid,
            window,
            condition: Condition::always(),
            fill: T::zero(),
            location,
        }
    }

    // ===== Copy-with-override builders =====

    /// Replace the transform, preserving condition and fill verbatim
    pub fn with_transform<F>(self, f: F) -> Self
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        Self {
            transform: Some(Arc::new(f)),
            ..self
        }
    }

    /// Replace the condition
    ///
    /// A dense mask must be defined on the node's grid (its shape was
    /// validated against the full indexable extent at mask construction) and
    /// is relocated to the operand's memory domain before being stored.
    pub fn with_condition(self, condition: Condition<R>) -> Result<Self> {
        let condition = match condition {
            Condition::Mask(mask) => {
                if !mask.grid().same_grid(&self.grid) {
                    return Err(Error::grid_mismatch(
                        self.grid.id().raw(),
                        mask.grid().id().raw(),
                    ));
                }
                let mask = if mask.grid().device().is_same(self.grid.device()) {
                    mask
                } else {
                    mask.to_device(self.grid.device())?
                };
                Condition::Mask(mask)
            }
            predicate => predicate,
        };
        Ok(Self { condition, ..self })
    }

    /// Replace the condition with a dense mask
    pub fn with_mask(self, mask: Mask<R>) -> Result<Self> {
        self.with_condition(Condition::Mask(mask))
    }

    /// Replace the condition with a predicate function
    pub fn with_predicate<F>(self, f: F) -> Self
    where
        F: Fn(usize, usize, usize, &Grid<R>) -> bool + Send + Sync + 'static,
    {
        Self {
            condition: Condition::predicate(f),
            ..self
        }
    }

    /// Replace the fill value
    pub fn with_fill(self, fill: T) -> Self {
        Self { fill, ..self }
    }

    /// Replace the fill value with an untyped scalar
    ///
    /// Fails when the scalar is not exactly representable in the operand's
    /// element type.
    pub fn with_fill_scalar(self, fill: f64) -> Result<Self> {
        let fill =
            T::try_from_f64(fill).ok_or_else(|| Error::type_incompatibility(fill, T::NAME))?;
        Ok(Self { fill, ..self })
    }

    // ===== Evaluation =====

    /// Evaluate the node at cell `(i, j, k)`
    ///
    /// Pure and side-effect-free; safe to invoke concurrently and redundantly
    /// from any number of evaluators. No caching: every access re-evaluates
    /// condition and transform. Callers must guarantee in-window access;
    /// bounds are asserted in debug builds only.
    #[inline]
    pub fn evaluate(&self, i: usize, j: usize, k: usize) -> T {
        debug_assert!(
            self.window.contains(i, j, k, self.grid.total_extents()),
            "evaluation outside the index window"
        );
        if self.condition.holds(i, j, k, &self.grid) {
            let v = self.operand.at(i, j, k);
            match &self.transform {
                Some(f) => f(v),
                None => v,
            }
        } else {
            self.fill
        }
    }

    // ===== Counting specialization =====

    /// Rebuild this node with the operand replaced by a constant-one field
    ///
    /// Same grid, window, location tags, and condition; identity transform
    /// and the given fill. Summing the result counts satisfied cells through
    /// the ordinary evaluation path.
    pub fn as_counting(&self, fill: T) -> Self {
        let ones =
            ConstantField::with_window(T::one(), &self.grid, self.window.clone(), self.location);
        Self {
            operand: Arc::new(ones),
            transform: None,
            grid: self.grid.clone(),
            window: self.window.clone(),
            condition: self.condition.clone(),
            fill,
            location: self.location,
        }
    }

    /// Number of in-window cells whose condition holds
    ///
    /// Independent of the node's transform, operand values, and fill.
    pub fn count(&self) -> T {
        super::sum(&self.as_counting(T::zero()))
    }

    /// Count satisfied cells along the given reduction axes
    ///
    /// Returns a field on a derived grid whose reduced axes have extent 1.
    pub fn count_along(&self, axes: &[usize]) -> Result<Field<R, T>> {
        super::sum_along(&self.as_counting(T::zero()), axes)
    }

    /// Materialize this node into freshly allocated storage
    pub fn materialize(&self) -> Result<Field<R, T>> {
        super::materialize(self)
    }

    // ===== Metadata surface =====

    /// The stored index window
    #[inline]
    pub fn indices(&self) -> &IndexWindow {
        &self.window
    }

    /// Concrete index range per axis
    ///
    /// A full-range axis resolves to the zero-based full extent; a restricted
    /// axis returns its explicit sub-range.
    pub fn axes(&self) -> [Range<usize>; 3] {
        self.window.resolve(self.grid.total_extents())
    }

    /// The fill value substituted where the condition is false
    #[inline]
    pub fn fill(&self) -> T {
        self.fill
    }

    /// The node's condition
    #[inline]
    pub fn condition(&self) -> &Condition<R> {
        &self.condition
    }

    /// Multi-line textual summary (diagnostic only)
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl<R: Runtime, T: Element> FieldLike<R> for ConditionalOp<R, T> {
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
        self.evaluate(i, j, k)
    }

    fn relocate_dyn(&self, device: &R::Device) -> Result<ArcField<R, T>> {
        Ok(Arc::new(self.to_device(device)?))
    }

    fn summary(&self) -> String {
        format!(
            "ConditionalOp<{}> at {} on {}",
            T::NAME,
            Location::triple(&self.location),
            self.grid
        )
    }
}

impl<R: Runtime, T: Element> Relocate<R> for ConditionalOp<R, T> {
    /// Relocate every constituent independently via its own contract
    ///
    /// Operand, grid, and dense mask each move through their `Relocate`
    /// implementations; predicates are carried as-is; the fill value and
    /// location tags are plain copies. The result is a structurally identical
    /// node, never an in-place device version.
    fn to_device(&self, device: &R::Device) -> Result<Self> {
        log::debug!("relocating {} to {}", self.summary(), device.name());
        let condition = match &self.condition {
            Condition::Mask(m) => Condition::Mask(m.to_device(device)?),
            Condition::Predicate(f) => Condition::Predicate(Arc::clone(f)),
        };
        Ok(Self {
            operand: self.operand.relocate_dyn(device)?,
            transform: self.transform.clone(),
            grid: self.grid.to_device(device)?,
            window: self.window.clone(),
            condition,
            fill: self.fill,
            location: self.location,
        })
    }
}

impl<R: Runtime, T: Element> Clone for ConditionalOp<R, T> {
    fn clone(&self) -> Self {
        Self {
            operand: Arc::clone(&self.operand),
            transform: self.transform.clone(),
            grid: self.grid.clone(),
            window: self.window.clone(),
            condition: self.condition.clone(),
            fill: self.fill,
            location: self.location,
        }
    }
}

impl<R: Runtime, T: Element> fmt::Display for ConditionalOp<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ConditionalOp<{}> at {}",
            T::NAME,
            Location::triple(&self.location)
        )?;
        writeln!(f, "├── operand: {}", self.operand.summary())?;
        writeln!(f, "├── grid: {}", self.grid)?;
        writeln!(f, "├── window: {}", self.window)?;
        writeln!(
            f,
            "├── transform: {}",
            if self.transform.is_some() {
                "custom"
            } else {
                "identity"
            }
        )?;
        writeln!(f, "├── condition: {}", self.condition)?;
        write!(f, "└── fill: {}", self.fill)
    }
}

impl<R: Runtime, T: Element> fmt::Debug for ConditionalOp<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalOp")
            .field("grid", &self.grid)
            .field("window", &self.window)
            .field("fill", &self.fill)
            .field("location", &Location::triple(&self.location))
            .finish()
    }
}
