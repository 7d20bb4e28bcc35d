//! Windowed reductions over lazy elementwise-evaluable values

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::field::{Field, FieldLike};
use crate::grid::Grid;
use crate::runtime::Runtime;

/// Sum every in-window cell of a field-like value
///
/// This is the summation primitive user-facing reduction drivers (`sum`,
/// `mean`, conditional counting) are built on. Evaluation order is
/// unspecified; the value is read through the elementwise protocol, so lazy
/// nodes are re-evaluated per cell.
pub fn sum<R, F>(field: &F) -> F::Elem
where
    R: Runtime,
    F: FieldLike<R>,
{
    let [ri, rj, rk] = field.window().resolve(field.grid().total_extents());

    #[cfg(feature = "rayon")]
    let total = {
        use rayon::prelude::*;
        ri.into_par_iter()
            .map(|i| {
                let mut acc = F::Elem::zero();
                for j in rj.clone() {
                    for k in rk.clone() {
                        acc = acc + field.at(i, j, k);
                    }
                }
                acc
            })
            .reduce(F::Elem::zero, |a, b| a + b)
    };

    #[cfg(not(feature = "rayon"))]
    let total = {
        let mut acc = F::Elem::zero();
        for i in ri {
            for j in rj.clone() {
                for k in rk.clone() {
                    acc = acc + field.at(i, j, k);
                }
            }
        }
        acc
    };

    total
}

/// Sum in-window cells, restricted to the given reduction axes
///
/// Axes name grid directions (0, 1, 2). The result is a concrete field on a
/// derived halo-free grid whose reduced axes have extent 1 and whose other
/// axes keep the window's extent; it lives on the input's memory domain and
/// keeps its location tags.
pub fn sum_along<R, F>(field: &F, axes: &[usize]) -> Result<Field<R, F::Elem>>
where
    R: Runtime,
    F: FieldLike<R>,
{
    let mut reduced = [false; 3];
    for &axis in axes {
        if axis >= 3 {
            return Err(Error::InvalidAxis { axis });
        }
        reduced[axis] = true;
    }

    let [ri, rj, rk] = field.window().resolve(field.grid().total_extents());
    let out_extent = [
        if reduced[0] { 1 } else { ri.len() },
        if reduced[1] { 1 } else { rj.len() },
        if reduced[2] { 1 } else { rk.len() },
    ];
    let out_grid = Grid::<R>::new(out_extent, 0, field.grid().device());

    let mut acc = vec![F::Elem::zero(); out_extent[0] * out_extent[1] * out_extent[2]];
    for i in ri.clone() {
        for j in rj.clone() {
            for k in rk.clone() {
                let oi = if reduced[0] { 0 } else { i - ri.start };
                let oj = if reduced[1] { 0 } else { j - rj.start };
                let ok = if reduced[2] { 0 } else { k - rk.start };
                let idx = (oi * out_extent[1] + oj) * out_extent[2] + ok;
                acc[idx] = acc[idx] + field.at(i, j, k);
            }
        }
    }

    Field::from_slice(&out_grid, field.location(), &acc)
}
