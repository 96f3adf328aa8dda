//! # polylog
//!
//! A computer-algebra engine for manipulating formal linear combinations of
//! algebraic symbols arising in polylogarithm functional identities.
//!
//! The engine is a facade over three member crates:
//!
//! - [`linear`](polylog_linear): the `Linear<P>` sparse-combination
//!   container, compressed term storage, and Lyndon canonicalization
//! - [`coalgebra`](polylog_coalgebra): tensor products, coproducts, and
//!   fixed-shape comultiplication
//! - [`symbols`](polylog_symbols): the concrete generator families
//!   (differences, minors, epsilon and theta factors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use polylog_coalgebra as coalgebra;
pub use polylog_linear as linear;
pub use polylog_symbols as symbols;

/// The most commonly used names, re-exported for glob import.
pub mod prelude {
    pub use polylog_coalgebra::{
        comultiply, coproduct, deconcatenation_coproduct, filtered_coexpr_part, tensor_product,
        tensor_product_all, CoExprParam, TensorParam,
    };
    pub use polylog_linear::{
        permutations_with_sign, to_lyndon_basis, ExprParam, Linear, LyndonOrder, PVector,
        VectorParam,
    };
    pub use polylog_symbols::delta::{d, substitute_variables, DeltaExpr};
    pub use polylog_symbols::gamma::g;
    pub use polylog_symbols::{
        ConvertError, Delta, Epsilon, EpsilonExpr, Gamma, GammaExpr, LiParam, LiraParam, Theta,
        ThetaExpr, X,
    };
}
