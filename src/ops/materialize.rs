//! Materialization: writing lazy values into concrete storage

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::field::{Field, FieldLike};
use crate::grid::Location;
use crate::runtime::Runtime;

/// Write every in-window value of `src` into caller-owned storage
///
/// The destination must live on the same grid with the same location tags.
/// The write assumes exclusive access to `dst` for the duration of the call;
/// arbitrating concurrent writers is the caller's responsibility. Validation
/// happens before any write: on error the destination is untouched.
pub fn materialize_into<R, T, F>(dst: &mut Field<R, T>, src: &F) -> Result<()>
where
    R: Runtime,
    T: Element,
    F: FieldLike<R, Elem = T>,
{
    if !dst.grid().same_grid(src.grid()) {
        return Err(Error::grid_mismatch(
            dst.grid().id().raw(),
            src.grid().id().raw(),
        ));
    }
    if dst.location() != src.location() {
        return Err(Error::LocationMismatch {
            expected: Location::triple(&dst.location()),
            got: Location::triple(&src.location()),
        });
    }

    let [ri, rj, rk] = src.window().resolve(src.grid().total_extents());
    log::trace!(
        "materializing {} over {}x{}x{} cells",
        src.summary(),
        ri.len(),
        rj.len(),
        rk.len()
    );

    for i in ri {
        for j in rj.clone() {
            for k in rk.clone() {
                dst.set(i, j, k, src.at(i, j, k));
            }
        }
    }
    Ok(())
}

/// Materialize `src` into freshly allocated zero-filled storage
///
/// Allocates a field shaped like `src` (same grid, same location tags) on
/// `src`'s memory domain, fills its window, and returns it. Out-of-window
/// cells, including the halo, stay zero.
pub fn materialize<R, F>(src: &F) -> Result<Field<R, F::Elem>>
where
    R: Runtime,
    F: FieldLike<R>,
{
    let mut out = Field::zeros_like(src)?;
    materialize_into(&mut out, src)?;
    Ok(out)
}
