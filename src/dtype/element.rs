//! Element trait for field storage and arithmetic

use bytemuck::{Pod, Zeroable};
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types that can be elements of a field
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - basic value-type requirements
/// - `Pod + Zeroable` - safe memory transmutation (bytemuck) for device
///   buffer transfers
/// - `Add + Sub + Mul + Div` - arithmetic operations (Output = Self)
/// - `PartialOrd` - comparison for reductions
/// - `Debug + Display` - diagnostic summaries
pub trait Element:
    Copy
    + Clone
    + Send
    + Sync
    + Pod
    + Zeroable
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialOrd
    + Debug
    + Display
{
    /// Name of this element type, for diagnostics and errors
    const NAME: &'static str;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Convert to f64 for generic numeric operations
    fn to_f64(self) -> f64;

    /// Convert from f64, rounding or saturating as the target type requires
    fn from_f64(v: f64) -> Self;

    /// Convert from f64 only if the value is exactly representable
    ///
    /// Integer types reject fractional, out-of-range, and non-finite values.
    /// This backs the type-incompatibility check on fill values supplied as
    /// untyped scalars.
    fn try_from_f64(v: f64) -> Option<Self>;
}

macro_rules! impl_element_float {
    ($ty:ty, $name:expr) => {
        impl Element for $ty {
            const NAME: &'static str = $name;

            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn one() -> Self {
                1.0
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $ty
            }

            #[inline]
            fn try_from_f64(v: f64) -> Option<Self> {
                Some(v as $ty)
            }
        }
    };
}

macro_rules! impl_element_int {
    ($ty:ty, $name:expr) => {
        impl Element for $ty {
            const NAME: &'static str = $name;

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn one() -> Self {
                1
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $ty
            }

            #[inline]
            fn try_from_f64(v: f64) -> Option<Self> {
                if !v.is_finite() || v.fract() != 0.0 {
                    return None;
                }
                if v < <$ty>::MIN as f64 || v > <$ty>::MAX as f64 {
                    return None;
                }
                Some(v as $ty)
            }
        }
    };
}

impl_element_float!(f64, "f64");
impl_element_float!(f32, "f32");
impl_element_int!(i64, "i64");
impl_element_int!(i32, "i32");
impl_element_int!(u32, "u32");
impl_element_int!(u8, "u8");
