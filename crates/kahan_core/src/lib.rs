//! # kahan_core: Compensated Floating-Point Arithmetic
//!
//! ## Role
//!
//! kahan_core provides drop-in substitutes for the native floating-point
//! types that track a running rounding-error correction (Kahan–Babuška
//! compensated summation) inside every arithmetic operator:
//! - Compensated value type and width aliases (`types::compensated`)
//! - Capability trait for the underlying representation (`types::raw`)
//! - Extended-precision backend over double-double arithmetic (`types::extended`)
//! - Summation helpers over iterators (`math::sum`)
//!
//! ## Minimal Dependencies
//!
//! The crate is a pure value-type library with no I/O surface:
//! - num-traits: Traits for generic numerical computation
//! - twofloat: Double-double arithmetic backing the extended width
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use kahan_core::types::KahanF64;
//!
//! let mut naive = 0.0_f64;
//! let mut compensated = KahanF64::new(0.0);
//! for _ in 0..20 {
//!     naive += 0.1;
//!     compensated += 0.1;
//! }
//!
//! // Native accumulation has drifted away from 2.0; the compensated
//! // accumulator recovers the exact result.
//! assert_ne!(naive, 2.0);
//! assert_eq!(compensated, 2.0);
//! ```
//!
//! ## IEEE-754 Semantics
//!
//! Infinities, NaNs, signed zero and comparison behaviour all follow the
//! native type exactly. The compensation term is accuracy-improving state:
//! it never participates in equality or ordering, and it is suppressed the
//! moment the running value leaves the finite range so a stale correction
//! cannot perturb an infinite or NaN accumulator.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for the value types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
