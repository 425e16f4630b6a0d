//! Free numeric functions built on the compensated value types.
//!
//! This module provides:
//! - `sum`: Compensated summation helpers over iterators
//!
//! # Re-exports
//!
//! - [`kahan_sum`], [`neumaier_sum`] from `sum`

pub mod sum;

pub use sum::{kahan_sum, neumaier_sum};
