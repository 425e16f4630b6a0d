//! Capability trait for the representation underneath a compensated float.
//!
//! [`RawFloat`] is the limits/traits adapter: it exposes the same queries
//! the native type exposes (`lowest`, `min_positive`, `max_value`,
//! `epsilon`, `infinity`, `quiet_nan`, `signaling_nan`, ...) keyed by the
//! representation type, so the compensated wrapper can forward each query
//! and re-wrap the result without inheriting from anything.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use num_traits::Zero;

/// Capability table for a native floating-point representation.
///
/// Implementations exist for `f32`, `f64` and
/// [`ExtendedFloat`](super::extended::ExtendedFloat). The operator bounds
/// are exactly the operations the Kahan–Babuška step needs; the `Zero`
/// supertrait supplies the exact zero the non-finite guard commits.
pub trait RawFloat:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Zero
{
    /// Whether the representation can encode infinity.
    const HAS_INFINITY: bool;

    /// Whether the representation conforms to IEC 559 (IEEE 754).
    const IS_IEC559: bool;

    /// Most negative finite value.
    fn lowest() -> Self;

    /// Smallest positive normal value.
    fn min_positive() -> Self;

    /// Largest finite value.
    fn max_value() -> Self;

    /// Difference between 1 and the next representable value.
    fn epsilon() -> Self;

    /// Positive infinity.
    fn infinity() -> Self;

    /// A quiet (non-signaling) NaN.
    fn quiet_nan() -> Self;

    /// A signaling NaN.
    fn signaling_nan() -> Self;

    /// Absolute value.
    fn abs(self) -> Self;

    /// True when the value is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// True when the value is NaN of either class.
    fn is_nan(self) -> bool;
}

macro_rules! impl_raw_float {
    ($t:ty, $snan:expr) => {
        impl RawFloat for $t {
            const HAS_INFINITY: bool = true;
            const IS_IEC559: bool = true;

            #[inline]
            fn lowest() -> Self {
                <$t>::MIN
            }

            #[inline]
            fn min_positive() -> Self {
                <$t>::MIN_POSITIVE
            }

            #[inline]
            fn max_value() -> Self {
                <$t>::MAX
            }

            #[inline]
            fn epsilon() -> Self {
                <$t>::EPSILON
            }

            #[inline]
            fn infinity() -> Self {
                <$t>::INFINITY
            }

            #[inline]
            fn quiet_nan() -> Self {
                <$t>::NAN
            }

            #[inline]
            fn signaling_nan() -> Self {
                // Quiet bit clear, payload non-zero.
                <$t>::from_bits($snan)
            }

            #[inline]
            fn abs(self) -> Self {
                self.abs()
            }

            #[inline]
            fn is_finite(self) -> bool {
                self.is_finite()
            }

            #[inline]
            fn is_nan(self) -> bool {
                self.is_nan()
            }
        }
    };
}

impl_raw_float!(f32, 0x7fa0_0000_u32);
impl_raw_float!(f64, 0x7ff4_0000_0000_0000_u64);
