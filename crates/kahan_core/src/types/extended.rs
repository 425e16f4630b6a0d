//! Extended-precision backend for the widest compensated float.
//!
//! Stable Rust has no 80- or 128-bit binary floating type, so the widest
//! instantiation is backed by double-double arithmetic from the `twofloat`
//! crate: an unevaluated sum of two `f64`s giving a 106-bit significand
//! over the `f64` exponent range.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use num_traits::Zero;
use twofloat::TwoFloat;

use super::raw::RawFloat;

/// Double-double representation standing in for the platform extended width.
///
/// Arithmetic on the raw `TwoFloat` pair leaves an undefined low word once
/// the high word leaves the finite range, so every operation on this
/// newtype canonicalises non-finite results to `(±inf, 0)` or `(NaN, 0)`.
/// That keeps infinity and NaN propagation, equality and ordering behaving
/// the way the native IEEE types behave.
///
/// # Examples
///
/// ```
/// use kahan_core::types::ExtendedFloat;
///
/// let a = ExtendedFloat::from(1.5_f64);
/// let b = ExtendedFloat::from(0.25_f64);
/// assert_eq!(f64::from(a + b), 1.75);
/// assert!(a > b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedFloat(TwoFloat);

impl ExtendedFloat {
    #[inline]
    fn canonical(raw: TwoFloat) -> Self {
        let hi = raw.hi();
        if hi.is_finite() {
            Self(raw)
        } else {
            // Collapse the undefined low word.
            Self(TwoFloat::from(hi))
        }
    }

    /// High word of the double-double pair (the value rounded to `f64`).
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0.hi()
    }
}

impl From<f64> for ExtendedFloat {
    #[inline]
    fn from(value: f64) -> Self {
        Self(TwoFloat::from(value))
    }
}

impl From<f32> for ExtendedFloat {
    #[inline]
    fn from(value: f32) -> Self {
        Self(TwoFloat::from(f64::from(value)))
    }
}

impl From<ExtendedFloat> for f64 {
    #[inline]
    fn from(value: ExtendedFloat) -> Self {
        value.to_f64()
    }
}

impl Add for ExtendedFloat {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::canonical(self.0 + rhs.0)
    }
}

impl Sub for ExtendedFloat {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::canonical(self.0 - rhs.0)
    }
}

impl Neg for ExtendedFloat {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::canonical(-self.0)
    }
}

impl Zero for ExtendedFloat {
    #[inline]
    fn zero() -> Self {
        Self(TwoFloat::from(0.0))
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.0 == TwoFloat::from(0.0)
    }
}

impl fmt::Display for ExtendedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl RawFloat for ExtendedFloat {
    const HAS_INFINITY: bool = true;
    // Both component words are IEC 559; special values and comparisons
    // follow the standard at the canonicalised level.
    const IS_IEC559: bool = true;

    #[inline]
    fn lowest() -> Self {
        -Self::max_value()
    }

    #[inline]
    fn min_positive() -> Self {
        Self(TwoFloat::from(f64::MIN_POSITIVE))
    }

    #[inline]
    fn max_value() -> Self {
        // High word at f64::MAX plus a positive low word just under half
        // an ulp: the largest canonical double-double, strictly above the
        // 64-bit maximum.
        Self(TwoFloat::new_add(f64::MAX, f64::MAX * (f64::EPSILON / 4.0)))
    }

    #[inline]
    fn epsilon() -> Self {
        // Unit roundoff of the 106-bit significand.
        Self(TwoFloat::from(f64::EPSILON * f64::EPSILON))
    }

    #[inline]
    fn infinity() -> Self {
        Self(TwoFloat::from(f64::INFINITY))
    }

    #[inline]
    fn quiet_nan() -> Self {
        Self(TwoFloat::from(f64::NAN))
    }

    #[inline]
    fn signaling_nan() -> Self {
        Self(TwoFloat::from(<f64 as RawFloat>::signaling_nan()))
    }

    #[inline]
    fn abs(self) -> Self {
        if self.0.hi().is_sign_negative() {
            -self
        } else {
            self
        }
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.0.hi().is_finite()
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.0.hi().is_nan()
    }
}
