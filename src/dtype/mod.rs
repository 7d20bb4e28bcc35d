//! Element type system
//!
//! Field element types are fixed at compile time. The [`Element`] trait
//! connects Rust's numeric primitives to the storage and reduction machinery.

mod element;

pub use element::Element;
