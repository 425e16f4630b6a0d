//! Compensated summation helpers.
//!
//! All functions use the generic type parameter `W: RawFloat`, so one
//! implementation covers the 32-bit, 64-bit and extended widths.

use crate::types::compensated::Compensated;
use crate::types::raw::RawFloat;

/// Sums an iterator of native values through a compensated accumulator.
///
/// Every addend passes through the Kahan–Babuška step, so the result
/// carries the correctly compensated total rather than the naively
/// rounded one.
///
/// # Examples
/// ```
/// use kahan_core::math::sum::kahan_sum;
///
/// let total = kahan_sum([0.1_f64; 20]);
/// assert_eq!(total, 2.0);
/// ```
pub fn kahan_sum<W, I>(values: I) -> Compensated<W>
where
    W: RawFloat,
    I: IntoIterator<Item = W>,
{
    let mut acc = Compensated::new(W::zero());
    for x in values {
        acc += x;
    }
    acc
}

/// Kahan–Babuška–Neumaier summation.
///
/// Like [`kahan_sum`], but when an addend dominates the running sum the
/// roles are swapped and the low-order bits of the *sum* are retained
/// instead. This recovers cases plain Kahan summation loses, such as a
/// huge intermediate value cancelling away again.
///
/// The correction is applied once at the end, so the returned accumulator
/// carries the corrected total with zero outstanding compensation.
///
/// # Examples
/// ```
/// use kahan_core::math::sum::{kahan_sum, neumaier_sum};
///
/// let values = [1.0_f64, 1e100, 1.0, -1e100];
/// assert_eq!(neumaier_sum(values), 2.0);
/// // Plain Kahan summation drops both unit addends here.
/// assert_eq!(kahan_sum(values), 0.0);
/// ```
pub fn neumaier_sum<W, I>(values: I) -> Compensated<W>
where
    W: RawFloat,
    I: IntoIterator<Item = W>,
{
    let mut sum = W::zero();
    let mut correction = W::zero();
    for x in values {
        let t = sum + x;
        if t.is_finite() {
            if sum.abs() >= x.abs() {
                correction = correction + ((sum - t) + x);
            } else {
                correction = correction + ((x - t) + sum);
            }
        } else {
            // Same rule as the value type: no correction survives a
            // non-finite transition.
            correction = W::zero();
        }
        sum = t;
    }
    Compensated::new(sum + correction)
}
