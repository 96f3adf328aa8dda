//! Errors raised when converting expressions between generator families.

use thiserror::Error;

/// Why a cross-family conversion failed.
///
/// Conversions are partial by nature: not every term of the source family
/// has a counterpart in the target family, and hitting such a term is a
/// recoverable condition for the caller (unlike the engine's precondition
/// violations, which panic).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The term contains a generator that is not a simple variable
    /// difference (e.g. `x_i + x_j` or `x_i - 0`).
    #[error("term contains a non-simple generator: {0}")]
    NonSimpleGenerator(String),

    /// The expression has the wrong minor dimension for the target family.
    #[error("expected dimension {expected}, found {found}")]
    WrongDimension {
        /// The dimension the target family requires.
        expected: i32,
        /// The dimension the source expression actually has.
        found: i32,
    },

    /// The term is a formal symbol, not a product of generators.
    #[error("term is a formal symbol, not a product")]
    FormalSymbol,

    /// The term contains a complement factor with no counterpart in the
    /// target family.
    #[error("term contains a complement factor")]
    ComplementFactor,
}
