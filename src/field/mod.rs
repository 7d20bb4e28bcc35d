//! Fields: concrete storage and the field-like protocol
//!
//! Everything a reduction or materialization routine consumes is a
//! [`FieldLike`]: concrete [`Field`]s, valueless [`ConstantField`]s, and lazy
//! operation nodes all satisfy the same elementwise-read contract.

mod constant;
mod core;
mod storage;
mod traits;

pub use self::core::Field;
pub use constant::ConstantField;
pub use storage::Storage;
pub use traits::{ArcField, FieldLike};
