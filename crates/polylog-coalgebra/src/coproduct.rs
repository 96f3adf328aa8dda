//! Deconcatenation coproducts and fixed-shape comultiplication.

use polylog_linear::linear::{ExprParam, Linear};
use polylog_linear::lyndon::{to_lyndon_basis, VectorParam};

use crate::coexpr::CoExprParam;

type PartKey<CoP> = <<CoP as CoExprParam>::PartParam as ExprParam>::Storage;

/// Pairs every term of `lhs` with every term of `rhs` into a binary
/// co-expression. Bilinear; Lie-algebra shapes are canonicalized through
/// the co-level Lyndon basis afterwards.
#[must_use]
pub fn coproduct<CoP: CoExprParam>(
    lhs: &Linear<CoP::PartParam>,
    rhs: &Linear<CoP::PartParam>,
) -> Linear<CoP> {
    coproduct_vec(&[lhs, rhs])
}

/// N-ary form of [`coproduct`]: one part per factor expression.
#[must_use]
pub fn coproduct_vec<CoP: CoExprParam>(factors: &[&Linear<CoP::PartParam>]) -> Linear<CoP> {
    assert!(!factors.is_empty(), "coproduct of no factors");

    let mut ret = Linear::<CoP>::new();
    let mut parts: Vec<PartKey<CoP>> = Vec::with_capacity(factors.len());
    build_co_terms::<CoP>(factors, 1, &mut parts, &mut ret);

    let mut ret = normalized_coproduct(ret);
    for factor in factors {
        ret = ret.copy_annotations_from(factor);
    }
    ret
}

fn build_co_terms<CoP: CoExprParam>(
    factors: &[&Linear<CoP::PartParam>],
    coeff: i64,
    parts: &mut Vec<PartKey<CoP>>,
    out: &mut Linear<CoP>,
) {
    let Some((head, tail)) = factors.split_first() else {
        out.add_to_key(CoP::letters_to_key(parts), coeff);
        return;
    };
    for (key, part_coeff) in head.iter_keys() {
        parts.push(key.clone());
        build_co_terms::<CoP>(tail, coeff * part_coeff, parts, out);
        parts.pop();
    }
}

/// Computes the full binary deconcatenation coproduct: for every term of
/// weight `n`, the sum over all `n + 1` split points of
/// `prefix ⊗ suffix`, empty parts included.
///
/// # Panics
///
/// Panics for Lie-algebra co-expression shapes: the antisymmetric
/// normalization would cancel the unity-part terms, so Lie families
/// comultiply through [`comultiply`] instead.
#[must_use]
pub fn deconcatenation_coproduct<CoP>(expr: &Linear<CoP::PartParam>) -> Linear<CoP>
where
    CoP: CoExprParam,
    CoP::PartParam: VectorParam,
{
    assert!(
        !CoP::IS_LIE_ALGEBRA,
        "deconcatenation coproduct is not defined for Lie-algebra co-expressions"
    );

    let mut ret = Linear::<CoP>::new();
    for (key, coeff) in expr.iter_keys() {
        let letters = <CoP::PartParam as VectorParam>::key_to_letters(key);
        for split in 0..=letters.len() {
            let prefix = <CoP::PartParam as VectorParam>::letters_to_key(&letters[..split]);
            let suffix = <CoP::PartParam as VectorParam>::letters_to_key(&letters[split..]);
            ret.add_to_key(CoP::letters_to_key(&[prefix, suffix]), coeff);
        }
    }
    ret.copy_annotations_from(expr)
}

/// Comultiplies into a fixed weight composition `form = (w1, ..., wk)`.
///
/// Split points are exactly the positions the part sizes imply. A term
/// whose weight differs from `w1 + ... + wk` contributes zero: an
/// over-specified decomposition is a valid zero, not an error. Each part is
/// reduced to the Lyndon basis; Lie-algebra shapes then canonicalize the
/// tuple of parts at the co-level.
#[must_use]
pub fn comultiply<CoP>(expr: &Linear<CoP::PartParam>, form: &[i32]) -> Linear<CoP>
where
    CoP: CoExprParam,
    CoP::PartParam: VectorParam,
{
    assert!(!form.is_empty(), "comultiplication into an empty form");
    assert!(
        form.iter().all(|&w| w >= 1),
        "comultiplication parts must have positive weight, got {form:?}"
    );
    let sizes: Vec<usize> = form
        .iter()
        .map(|&w| usize::try_from(w).expect("part weight fits in usize"))
        .collect();
    let total: usize = sizes.iter().sum();

    let mut ret = Linear::<CoP>::new();
    for (key, coeff) in expr.iter_keys() {
        let letters = <CoP::PartParam as VectorParam>::key_to_letters(key);
        if letters.len() != total {
            continue;
        }

        // Reduce each contiguous slice to the Lyndon basis, then take the
        // cartesian product of the reduced parts.
        let mut reduced_parts: Vec<Linear<CoP::PartParam>> = Vec::with_capacity(sizes.len());
        let mut offset = 0usize;
        for &w in &sizes {
            let part_key =
                <CoP::PartParam as VectorParam>::letters_to_key(&letters[offset..offset + w]);
            reduced_parts.push(to_lyndon_basis(&Linear::single_key(part_key)));
            offset += w;
        }

        let mut parts: Vec<PartKey<CoP>> = Vec::with_capacity(form.len());
        expand_reduced_parts::<CoP>(&reduced_parts, coeff, &mut parts, &mut ret);
    }

    normalized_coproduct(ret).copy_annotations_from(expr)
}

fn expand_reduced_parts<CoP: CoExprParam>(
    reduced: &[Linear<CoP::PartParam>],
    coeff: i64,
    parts: &mut Vec<PartKey<CoP>>,
    out: &mut Linear<CoP>,
) {
    let Some((head, tail)) = reduced.split_first() else {
        out.add_to_key(CoP::letters_to_key(parts), coeff);
        return;
    };
    for (key, part_coeff) in head.iter_keys() {
        parts.push(key.clone());
        expand_reduced_parts::<CoP>(tail, coeff * part_coeff, parts, out);
        parts.pop();
    }
}

fn normalized_coproduct<CoP: CoExprParam>(expr: Linear<CoP>) -> Linear<CoP> {
    if CoP::IS_LIE_ALGEBRA {
        to_lyndon_basis(&expr)
    } else {
        expr
    }
}
