//! Co-expression parameterizations.

use polylog_linear::linear::{ExprParam, Linear};
use polylog_linear::lyndon::VectorParam;

/// A parameterization of co-expressions: linear combinations whose terms
/// are ordered tuples of *parts*, each part a term of the underlying
/// expression family.
///
/// At the co-expression level the letters of a term are whole part keys,
/// so the family's Lyndon machinery doubles as the coalgebra normalizer.
pub trait CoExprParam:
    VectorParam<
    Object = Vec<<Self::PartParam as ExprParam>::Object>,
    Letter = <Self::PartParam as ExprParam>::Storage,
>
{
    /// The parameterization of a single part.
    type PartParam: ExprParam;

    /// Whether coproducts of this shape live in the Lie coalgebra: parts
    /// are canonicalized antisymmetrically through the co-level Lyndon
    /// basis (`x ∧ x = 0`, swapping adjacent parts flips the sign).
    const IS_LIE_ALGEBRA: bool;

    /// Whether the iteration structure of the parts is retained for
    /// comparison and display (iterated vs. normal coproduct shape).
    const IS_ITERATED: bool;
}

/// Keeps only co-expression terms whose part at `part_index` satisfies the
/// predicate. Coefficients are unchanged.
///
/// # Panics
///
/// Panics if some term has fewer than `part_index + 1` parts.
#[must_use]
pub fn filtered_coexpr_part<CoP: CoExprParam>(
    expr: &Linear<CoP>,
    part_index: usize,
    pred: impl Fn(&<CoP::PartParam as ExprParam>::Object) -> bool,
) -> Linear<CoP> {
    expr.filtered(|parts| {
        assert!(
            part_index < parts.len(),
            "co-expression term has {} parts, requested part {part_index}",
            parts.len()
        );
        pred(&parts[part_index])
    })
}
