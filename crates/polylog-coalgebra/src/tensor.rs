//! Tensor (monomial) products of linear combinations.

use rayon::prelude::*;

use polylog_linear::linear::{ExprParam, Linear};

/// Pair count above which the product enumeration runs on the rayon pool.
/// Partial results merge through the same accumulate-and-cancel rule, which
/// is commutative and associative, so the merge order is irrelevant.
const PARALLEL_PAIR_THRESHOLD: usize = 1 << 14;

/// An expression family supporting concatenation of term keys.
pub trait TensorParam: ExprParam {
    /// Concatenates two term keys.
    ///
    /// # Panics
    ///
    /// Panics when either key is not in product form (formal symbols) or
    /// when the keys are structurally incompatible (mixed minor dimensions).
    fn monom_tensor_product(lhs: &Self::Storage, rhs: &Self::Storage) -> Self::Storage;
}

/// Computes the tensor product of two combinations: every term pair
/// concatenates, coefficients multiply, results accumulate and cancel.
///
/// Bilinear and associative. No sign is introduced by reordering; callers
/// needing antisymmetry expand permutations with tracked signs themselves.
#[must_use]
pub fn tensor_product<P>(lhs: &Linear<P>, rhs: &Linear<P>) -> Linear<P>
where
    P: TensorParam,
    P::Storage: Send + Sync,
{
    let pairs = lhs.num_terms() * rhs.num_terms();
    if pairs >= PARALLEL_PAIR_THRESHOLD {
        let lhs_terms: Vec<_> = lhs.iter_keys().collect();
        return lhs_terms
            .par_iter()
            .fold(Linear::<P>::new, |mut acc, &(l_key, l_coeff)| {
                for (r_key, r_coeff) in rhs.iter_keys() {
                    acc.add_to_key(P::monom_tensor_product(l_key, r_key), l_coeff * r_coeff);
                }
                acc
            })
            .reduce(Linear::<P>::new, |mut a, b| {
                a += b;
                a
            });
    }

    let mut ret = Linear::<P>::new();
    for (l_key, l_coeff) in lhs.iter_keys() {
        for (r_key, r_coeff) in rhs.iter_keys() {
            ret.add_to_key(P::monom_tensor_product(l_key, r_key), l_coeff * r_coeff);
        }
    }
    ret
}

/// Folds [`tensor_product`] over a non-empty sequence of combinations.
///
/// # Panics
///
/// Panics on an empty sequence: the tensor unit is family-specific, so an
/// empty product has no well-defined value here.
#[must_use]
pub fn tensor_product_all<P>(exprs: &[Linear<P>]) -> Linear<P>
where
    P: TensorParam,
    P::Storage: Send + Sync,
{
    let (first, rest) = exprs
        .split_first()
        .expect("tensor product of an empty sequence of expressions");
    rest.iter()
        .fold(first.clone(), |acc, expr| tensor_product(&acc, expr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simple::{sv, SimpleVectorExpr};

    #[test]
    fn test_tensor_product_concatenates_terms() {
        let lhs = sv(&[1]) - sv(&[2]);
        let rhs = sv(&[3]) + sv(&[4]) * 3;
        let prod = tensor_product(&lhs, &rhs);
        assert_eq!(
            prod,
            sv(&[1, 3]) + sv(&[1, 4]) * 3 - sv(&[2, 3]) - sv(&[2, 4]) * 3
        );
    }

    #[test]
    fn test_tensor_product_is_bilinear() {
        let a = sv(&[1]) + sv(&[2]) * 2;
        let b = sv(&[3]) - sv(&[1]);
        let c = sv(&[2, 4]);
        assert_eq!(
            tensor_product(&(&a + &b), &c),
            tensor_product(&a, &c) + tensor_product(&b, &c)
        );
    }

    #[test]
    fn test_tensor_product_with_zero_is_zero() {
        let a = sv(&[1, 2]);
        assert!(tensor_product(&a, &SimpleVectorExpr::new()).is_zero());
    }

    #[test]
    fn test_tensor_product_all() {
        let product = tensor_product_all(&[sv(&[1]), sv(&[2]), sv(&[3])]);
        assert_eq!(product, sv(&[1, 2, 3]));
    }

    #[test]
    #[should_panic(expected = "empty sequence")]
    fn test_tensor_product_all_rejects_empty_input() {
        let _ = tensor_product_all::<crate::simple::SimpleVectorExprParam>(&[]);
    }
}
