//! Operations over field-like values
//!
//! The conditional-masking node lives here, together with the two drivers
//! that consume any [`FieldLike`](crate::field::FieldLike): windowed
//! reductions and materialization into concrete storage.

mod conditional;
mod materialize;
mod reduce;

pub use conditional::{conditional, ConditionalOp, Transform};
pub use materialize::{materialize, materialize_into};
pub use reduce::{sum, sum_along};
