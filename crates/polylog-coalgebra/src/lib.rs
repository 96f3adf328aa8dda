//! # polylog-coalgebra
//!
//! Coalgebra operations over `Linear<P>` combinations: tensor (monomial)
//! products, deconcatenation coproducts, and fixed-shape comultiplication.
//!
//! Co-expressions come in three shapes, selected per family by its
//! [`CoExprParam`]: *iterated* (the full ordered tuple of parts),
//! *normal* (same parts, compared without the iteration structure), and
//! *Lie-algebra* (parts canonicalized through the Lyndon basis, giving the
//! antisymmetrization used to test Lie-coalgebra identities).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod coexpr;
pub mod coproduct;
pub mod simple;
pub mod tensor;

#[cfg(test)]
mod proptests;

pub use coexpr::{filtered_coexpr_part, CoExprParam};
pub use coproduct::{comultiply, coproduct, coproduct_vec, deconcatenation_coproduct};
pub use tensor::{tensor_product, tensor_product_all, TensorParam};
