//! Compensated (Kahan–Babuška) floating-point value type.
//!
//! Every arithmetic entry point (`+`, `-`, `+=`, `-=`) funnels through a
//! single compensation step that recovers the rounding error native
//! accumulation discards. Comparisons and conversions read the running
//! value only; the correction term is accuracy-improving state, never part
//! of the value's identity.

use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use num_traits::Zero;

use super::extended::ExtendedFloat;
use super::raw::RawFloat;

/// Floating-point accumulator carrying a running rounding-error correction.
///
/// `Compensated<W>` is a drop-in substitute for the native representation
/// `W`: it wraps the best current approximation of the accumulated sum
/// together with the correction term discarded by the last addition, and
/// folds that correction into the next addition (Kahan–Babuška summation).
/// Special values behave exactly as they do natively: `inf + finite` stays
/// infinite, `inf - inf` is NaN, NaN is unordered against everything
/// including itself.
///
/// # Examples
///
/// ```
/// use kahan_core::types::KahanF32;
///
/// let mut acc = KahanF32::new(0.0);
/// for _ in 0..20 {
///     acc += 0.1_f32;
/// }
/// assert_eq!(acc, 2.0_f32);
///
/// // Mixed arithmetic and comparison against the bare native type.
/// let one = KahanF32::new(1.0);
/// assert_eq!(one + 1.0, 2.0_f32);
/// assert!(0.0_f32 < one);
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compensated<W: RawFloat> {
    value: W,
    compensation: W,
}

/// 32-bit compensated float.
pub type KahanF32 = Compensated<f32>;

/// 64-bit compensated float.
pub type KahanF64 = Compensated<f64>;

/// Extended-precision compensated float backed by [`ExtendedFloat`].
pub type KahanExt = Compensated<ExtendedFloat>;

impl<W: RawFloat> Compensated<W> {
    /// Whether the underlying representation can encode infinity.
    pub const HAS_INFINITY: bool = W::HAS_INFINITY;

    /// Whether the underlying representation conforms to IEC 559 (IEEE 754).
    pub const IS_IEC559: bool = W::IS_IEC559;

    /// Wraps a native value with zero outstanding correction.
    #[inline]
    pub fn new(value: W) -> Self {
        Self {
            value,
            compensation: W::zero(),
        }
    }

    /// Best current approximation of the accumulated sum.
    #[inline]
    pub fn value(&self) -> W {
        self.value
    }

    /// Outstanding correction term.
    ///
    /// Exposed for white-box diagnostics and tests only; it does not
    /// participate in equality, ordering or conversion.
    #[inline]
    pub fn compensation(&self) -> W {
        self.compensation
    }

    /// True when the running value is neither infinite nor NaN.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }

    /// True when the running value is NaN.
    #[inline]
    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    /// Most negative finite value, wrapped with zero correction.
    #[inline]
    pub fn lowest() -> Self {
        Self::new(W::lowest())
    }

    /// Smallest positive normal value, wrapped with zero correction.
    #[inline]
    pub fn min_positive() -> Self {
        Self::new(W::min_positive())
    }

    /// Largest finite value, wrapped with zero correction.
    #[inline]
    pub fn max_value() -> Self {
        Self::new(W::max_value())
    }

    /// Machine epsilon of the underlying representation.
    #[inline]
    pub fn epsilon() -> Self {
        Self::new(W::epsilon())
    }

    /// Positive infinity, wrapped with zero correction.
    #[inline]
    pub fn infinity() -> Self {
        Self::new(W::infinity())
    }

    /// A quiet NaN, wrapped with zero correction.
    #[inline]
    pub fn quiet_nan() -> Self {
        Self::new(W::quiet_nan())
    }

    /// A signaling NaN, wrapped with zero correction.
    #[inline]
    pub fn signaling_nan() -> Self {
        Self::new(W::signaling_nan())
    }

    /// Single Kahan–Babuška step: folds the increment `x` into the
    /// accumulator.
    ///
    /// The operation order is load-bearing. `(t - value) - y` recovers the
    /// low-order bits of `y` that rounding dropped from `t`; reassociating
    /// or fusing these operations cancels the whole term to zero.
    #[inline]
    fn accumulate(&mut self, x: W) {
        let y = x - self.compensation;
        let t = self.value + y;
        // A non-finite sum must not retain a correction from the finite
        // regime: a later finite addend would fold it back in and corrupt
        // an infinity, or perturb a NaN.
        self.compensation = if t.is_finite() {
            (t - self.value) - y
        } else {
            W::zero()
        };
        self.value = t;
    }
}

impl<W: RawFloat> Default for Compensated<W> {
    #[inline]
    fn default() -> Self {
        Self::new(W::zero())
    }
}

impl<W: RawFloat> From<W> for Compensated<W> {
    #[inline]
    fn from(value: W) -> Self {
        Self::new(value)
    }
}

// Widening constructions. Coherence forbids a blanket impl over every
// narrower width, so these are spelled out per pair.
impl From<f32> for Compensated<f64> {
    #[inline]
    fn from(value: f32) -> Self {
        Self::new(f64::from(value))
    }
}

impl From<f32> for Compensated<ExtendedFloat> {
    #[inline]
    fn from(value: f32) -> Self {
        Self::new(ExtendedFloat::from(value))
    }
}

impl From<f64> for Compensated<ExtendedFloat> {
    #[inline]
    fn from(value: f64) -> Self {
        Self::new(ExtendedFloat::from(value))
    }
}

// Narrowing back to the native width reads the running value only.
impl From<Compensated<f32>> for f32 {
    #[inline]
    fn from(k: Compensated<f32>) -> Self {
        k.value
    }
}

impl From<Compensated<f64>> for f64 {
    #[inline]
    fn from(k: Compensated<f64>) -> Self {
        k.value
    }
}

impl From<Compensated<ExtendedFloat>> for ExtendedFloat {
    #[inline]
    fn from(k: Compensated<ExtendedFloat>) -> Self {
        k.value
    }
}

impl From<Compensated<ExtendedFloat>> for f64 {
    #[inline]
    fn from(k: Compensated<ExtendedFloat>) -> Self {
        f64::from(k.value)
    }
}

impl<W: RawFloat> Add for Compensated<W> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<W: RawFloat> Add<W> for Compensated<W> {
    type Output = Self;

    #[inline]
    fn add(mut self, rhs: W) -> Self {
        self += rhs;
        self
    }
}

impl<W: RawFloat> Sub for Compensated<W> {
    type Output = Self;

    #[inline]
    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<W: RawFloat> Sub<W> for Compensated<W> {
    type Output = Self;

    #[inline]
    fn sub(mut self, rhs: W) -> Self {
        self -= rhs;
        self
    }
}

impl<W: RawFloat> AddAssign for Compensated<W> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        // A compensated increment contributes its own corrected estimate.
        self.accumulate(rhs.value - rhs.compensation);
    }
}

impl<W: RawFloat> AddAssign<W> for Compensated<W> {
    #[inline]
    fn add_assign(&mut self, rhs: W) {
        self.accumulate(rhs);
    }
}

impl<W: RawFloat> SubAssign for Compensated<W> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.accumulate(-(rhs.value - rhs.compensation));
    }
}

impl<W: RawFloat> SubAssign<W> for Compensated<W> {
    #[inline]
    fn sub_assign(&mut self, rhs: W) {
        self.accumulate(-rhs);
    }
}

impl<W: RawFloat> Neg for Compensated<W> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        // Exact: negation distributes over value and correction alike.
        Self {
            value: -self.value,
            compensation: -self.compensation,
        }
    }
}

// Comparisons read the running value only, with native semantics (NaN is
// unordered against everything, including itself).
impl<W: RawFloat> PartialEq for Compensated<W> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<W: RawFloat> PartialEq<W> for Compensated<W> {
    #[inline]
    fn eq(&self, other: &W) -> bool {
        self.value == *other
    }
}

impl<W: RawFloat> PartialOrd for Compensated<W> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<W: RawFloat> PartialOrd<W> for Compensated<W> {
    #[inline]
    fn partial_cmp(&self, other: &W) -> Option<Ordering> {
        self.value.partial_cmp(other)
    }
}

// Native-on-the-left arithmetic and comparisons. The self type must be a
// concrete local or primitive type, so these cannot be blanket impls.
macro_rules! impl_native_operand {
    ($($t:ty),*) => {$(
        impl Add<Compensated<$t>> for $t {
            type Output = Compensated<$t>;

            #[inline]
            fn add(self, rhs: Compensated<$t>) -> Compensated<$t> {
                Compensated::new(self) + rhs
            }
        }

        impl Sub<Compensated<$t>> for $t {
            type Output = Compensated<$t>;

            #[inline]
            fn sub(self, rhs: Compensated<$t>) -> Compensated<$t> {
                Compensated::new(self) - rhs
            }
        }

        impl PartialEq<Compensated<$t>> for $t {
            #[inline]
            fn eq(&self, other: &Compensated<$t>) -> bool {
                *self == other.value
            }
        }

        impl PartialOrd<Compensated<$t>> for $t {
            #[inline]
            fn partial_cmp(&self, other: &Compensated<$t>) -> Option<Ordering> {
                self.partial_cmp(&other.value)
            }
        }
    )*};
}

impl_native_operand!(f32, f64, ExtendedFloat);

impl<W: RawFloat> Zero for Compensated<W> {
    #[inline]
    fn zero() -> Self {
        Self::new(W::zero())
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl<W: RawFloat> fmt::Display for Compensated<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl<W: RawFloat> Sum<W> for Compensated<W> {
    fn sum<I: Iterator<Item = W>>(iter: I) -> Self {
        let mut acc = Self::new(W::zero());
        for x in iter {
            acc += x;
        }
        acc
    }
}

impl<W: RawFloat> Sum for Compensated<W> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut acc = Self::new(W::zero());
        for x in iter {
            acc += x;
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_starts_with_zero_compensation() {
        let k = KahanF64::new(1.5);
        assert_eq!(k.value(), 1.5);
        assert_eq!(k.compensation(), 0.0);
    }

    #[test]
    fn accumulate_recovers_dropped_bits() {
        // 1.0 + 1e-17 rounds away in f64; the correction retains it, and
        // retains it exactly (the lost addend is the whole increment).
        let mut k = KahanF64::new(1.0);
        k += 1e-17;
        assert_eq!(k.value(), 1.0);
        assert_eq!(k.compensation(), -1e-17);

        // A second increment folds into the same correction term.
        k += 1e-17;
        assert_eq!(k.value(), 1.0);
        assert_eq!(k.compensation(), -2e-17);
    }

    #[test]
    fn accumulated_corrections_surface_in_the_running_value() {
        // Natively, 1.0 + 2^-54 rounds back to 1.0 every time. The
        // compensated accumulator carries the quarter-ulps until they
        // amount to a representable step.
        let mut naive = 1.0_f64;
        let mut k = KahanF64::new(1.0);
        for _ in 0..4 {
            naive += 2_f64.powi(-54);
            k += 2_f64.powi(-54);
        }
        assert_eq!(naive, 1.0);
        assert_eq!(k.value(), 1.0 + 2_f64.powi(-52));
        assert_eq!(k.compensation(), 0.0);
    }

    #[test]
    fn non_finite_result_suppresses_compensation() {
        let mut k = KahanF64::new(1.0);
        k += 1e-17; // non-zero compensation
        k += f64::INFINITY;
        assert_eq!(k.value(), f64::INFINITY);
        assert_eq!(k.compensation(), 0.0);

        // The round trip must not manufacture a NaN out of a stale
        // correction term.
        k += 1.0;
        k -= 1.0;
        assert_eq!(k.value(), f64::INFINITY);
    }

    #[test]
    fn negation_flips_value_and_compensation() {
        let mut k = KahanF64::new(1.0);
        k += 1e-17;
        let n = -k;
        assert_eq!(n.value(), -k.value());
        assert_eq!(n.compensation(), -k.compensation());
    }

    #[test]
    fn compensated_operands_fold_their_own_correction() {
        // `a` holds 1.0 with an outstanding -2^-53 correction.
        let mut a = KahanF64::new(1.0);
        a += 2_f64.powi(-54);
        a += 2_f64.powi(-54);
        assert_eq!(a.value(), 1.0);
        assert_eq!(a.compensation(), -2_f64.powi(-53));

        // Adding another compensated half-ulp lands the full 2^-52 step,
        // which neither operand's running value holds on its own.
        let b = KahanF64::new(2_f64.powi(-53));
        let c = a + b;
        assert_eq!(c.value(), 1.0 + 2_f64.powi(-52));
    }

    #[test]
    fn widening_conversions() {
        let k64: KahanF64 = 1.5_f32.into();
        assert_eq!(k64, 1.5_f64);

        let kext: KahanExt = 1.5_f64.into();
        assert_eq!(f64::from(kext), 1.5);
    }

    #[test]
    fn conversion_preserves_signed_zero() {
        let k = KahanF64::from(-0.0_f64);
        assert!(f64::from(k).is_sign_negative());
        let k = KahanF32::from(0.0_f32);
        assert!(f32::from(k).is_sign_positive());
    }

    #[test]
    fn zero_and_default() {
        assert!(KahanF64::zero().is_zero());
        assert_eq!(KahanF64::default(), 0.0);
        let mut k = KahanF64::zero();
        k += 1.0;
        assert!(!k.is_zero());
    }

    #[test]
    fn display_shows_running_value() {
        let k = KahanF64::new(1.5);
        assert_eq!(format!("{}", k), "1.5");
    }

    #[test]
    fn sum_over_native_and_compensated_items() {
        let total: KahanF64 = [0.1_f64; 20].into_iter().sum();
        assert_eq!(total, 2.0);

        let parts = [KahanF64::new(1.0), KahanF64::new(2.0)];
        let total: KahanF64 = parts.into_iter().sum();
        assert_eq!(total, 3.0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn finite_f64_strategy() -> impl Strategy<Value = f64> {
            prop::num::f64::NORMAL
        }

        proptest! {
            #[test]
            fn reflexive_comparisons_for_finite_values(x in finite_f64_strategy()) {
                let k = KahanF64::new(x);
                prop_assert!(k == k);
                prop_assert!(k <= k);
                prop_assert!(k >= k);
                prop_assert!(k == x);
                prop_assert!(x == k);
            }

            #[test]
            fn mixed_comparison_matches_native_ordering(
                a in finite_f64_strategy(),
                b in finite_f64_strategy()
            ) {
                let ka = KahanF64::new(a);
                let kb = KahanF64::new(b);
                prop_assert_eq!(ka < kb, a < b);
                prop_assert_eq!(ka == kb, a == b);
                prop_assert_eq!(ka > kb, a > b);
                prop_assert_eq!(a < kb, a < b);
                prop_assert_eq!(ka < b, a < b);
            }

            #[test]
            fn compensation_stays_finite_under_finite_accumulation(
                xs in prop::collection::vec(-1e6_f64..1e6, 1..100)
            ) {
                let mut acc = KahanF64::new(0.0);
                for x in xs {
                    acc += x;
                    prop_assert!(acc.compensation().is_finite());
                }
            }

            #[test]
            fn round_trip_is_idempotent_for_finite_values(
                xs in prop::collection::vec(-1e6_f64..1e6, 1..50)
            ) {
                let mut acc = KahanF64::new(0.0);
                for x in xs {
                    acc += x;
                }
                let rewrapped = KahanF64::from(f64::from(acc));
                prop_assert!(rewrapped == acc);
                prop_assert_eq!(rewrapped.compensation(), 0.0);
            }

            #[test]
            fn compensated_error_within_kahan_bound(
                xs in prop::collection::vec(-1e3_f32..1e3, 1..200)
            ) {
                let compensated: KahanF32 = xs.iter().copied().sum();
                let naive = xs.iter().fold(0.0_f32, |acc, &x| acc + x);
                // Reference sum in double precision is exact to well below
                // single-precision resolution for these magnitudes.
                let reference: f64 = xs.iter().map(|&x| f64::from(x)).sum();
                let sum_abs: f64 = xs.iter().map(|&x| f64::from(x).abs()).sum();

                let err_compensated = (f64::from(compensated.value()) - reference).abs();
                let err_naive = (f64::from(naive) - reference).abs();
                let bound = 2.0 * f64::from(f32::EPSILON) * sum_abs;
                prop_assert!(err_compensated <= err_naive + bound);
            }
        }
    }
}
