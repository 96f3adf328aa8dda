//! # polylog-linear
//!
//! The linear-combination engine underlying polylogarithm symbol calculus.
//!
//! This crate provides:
//! - `PVector`: fixed-capacity inline term storage
//! - `Linear<P>`: sparse map from canonical term to integer coefficient
//! - Lyndon-word canonicalization and shuffle-modular reduction
//! - Sign-tracked permutation enumeration
//!
//! Concrete generator families (differences of points, Grassmannian minors,
//! epsilon/theta factors) live in `polylog-symbols`; the coalgebra operators
//! live in `polylog-coalgebra`. Both are thin parameterizations of the
//! machinery defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod linear;
pub mod lyndon;
pub mod notation;
pub mod ordering;
pub mod perm;
pub mod pvector;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod test_util;

pub use linear::{ExprParam, Linear};
pub use lyndon::{to_lyndon_basis, VectorParam};
pub use ordering::LyndonOrder;
pub use perm::permutations_with_sign;
pub use pvector::PVector;
