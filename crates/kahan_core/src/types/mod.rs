//! Compensated floating-point value types.
//!
//! This module provides:
//! - `compensated`: The `Compensated<W>` value type and its width aliases
//! - `raw`: The `RawFloat` capability trait describing the underlying representation
//! - `extended`: Double-double backend standing in for the platform extended width
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Compensated`], [`KahanF32`], [`KahanF64`], [`KahanExt`] from `compensated`
//! - [`RawFloat`] from `raw`
//! - [`ExtendedFloat`] from `extended`

pub mod compensated;
pub mod extended;
pub mod raw;

// Re-export commonly used types at module level
pub use compensated::{Compensated, KahanExt, KahanF32, KahanF64};
pub use extended::ExtendedFloat;
pub use raw::RawFloat;
