//! The simple-vector family: terms are plain integer words.
//!
//! This is the smallest complete parameterization of the engine. It exists
//! for tests, benches and worked examples; the production families in
//! `polylog-symbols` follow the same shape with real generator types.

use polylog_linear::linear::{ExprParam, Linear};
use polylog_linear::lyndon::VectorParam;
use polylog_linear::notation;
use polylog_linear::ordering::LyndonOrder;
use polylog_linear::pvector::PVector;

use crate::coexpr::CoExprParam;
use crate::tensor::TensorParam;

/// Expression parameterization over integer words.
pub struct SimpleVectorExprParam;

/// A linear combination of integer words.
pub type SimpleVectorExpr = Linear<SimpleVectorExprParam>;

impl ExprParam for SimpleVectorExprParam {
    type Object = Vec<i32>;
    type Storage = PVector<i32, 10>;

    fn object_to_key(obj: &Self::Object) -> Self::Storage {
        PVector::from_slice(obj)
    }

    fn key_to_object(key: &Self::Storage) -> Self::Object {
        key.to_vec()
    }

    fn object_to_string(obj: &Self::Object) -> String {
        format!(
            "({})",
            notation::join(obj.iter().map(ToString::to_string), ", ")
        )
    }

    fn object_to_weight(obj: &Self::Object) -> i32 {
        i32::try_from(obj.len()).expect("term weight fits in i32")
    }
}

impl VectorParam for SimpleVectorExprParam {
    type Letter = i32;

    fn key_to_letters(key: &Self::Storage) -> Vec<i32> {
        key.to_vec()
    }

    fn letters_to_key(letters: &[i32]) -> Self::Storage {
        PVector::from_slice(letters)
    }
}

impl TensorParam for SimpleVectorExprParam {
    fn monom_tensor_product(lhs: &Self::Storage, rhs: &Self::Storage) -> Self::Storage {
        lhs.concat(rhs)
    }
}

/// Co-expression parameterization over integer words (Lie-algebra shape).
pub struct SimpleVectorCoExprParam;

/// A linear combination of part tuples of integer words.
pub type SimpleVectorCoExpr = Linear<SimpleVectorCoExprParam>;

impl ExprParam for SimpleVectorCoExprParam {
    type Object = Vec<Vec<i32>>;
    type Storage = PVector<PVector<i32, 10>, 4>;

    fn object_to_key(obj: &Self::Object) -> Self::Storage {
        obj.iter()
            .map(|part| SimpleVectorExprParam::object_to_key(part))
            .collect()
    }

    fn key_to_object(key: &Self::Storage) -> Self::Object {
        key.iter().map(|part| part.to_vec()).collect()
    }

    fn object_to_string(obj: &Self::Object) -> String {
        notation::join(
            obj.iter().map(SimpleVectorExprParam::object_to_string),
            notation::COPROD_NORMAL,
        )
    }

    fn object_to_weight(obj: &Self::Object) -> i32 {
        obj.iter().map(SimpleVectorExprParam::object_to_weight).sum()
    }
}

impl VectorParam for SimpleVectorCoExprParam {
    type Letter = PVector<i32, 10>;

    const LYNDON_ORDER: LyndonOrder = LyndonOrder::LengthFirst;

    fn key_to_letters(key: &Self::Storage) -> Vec<Self::Letter> {
        key.to_vec()
    }

    fn letters_to_key(letters: &[Self::Letter]) -> Self::Storage {
        PVector::from_slice(letters)
    }
}

impl CoExprParam for SimpleVectorCoExprParam {
    type PartParam = SimpleVectorExprParam;

    const IS_LIE_ALGEBRA: bool = true;
    const IS_ITERATED: bool = false;
}

/// Builds a single-term expression from a word.
#[must_use]
pub fn sv(word: &[i32]) -> SimpleVectorExpr {
    SimpleVectorExpr::single(word.to_vec())
}

/// Builds a single-term co-expression from a tuple of parts.
#[must_use]
pub fn co_sv(parts: &[&[i32]]) -> SimpleVectorCoExpr {
    SimpleVectorCoExpr::single(parts.iter().map(|part| part.to_vec()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coexpr::{filtered_coexpr_part, CoExprParam};
    use crate::coproduct::{comultiply, coproduct, deconcatenation_coproduct};

    #[test]
    fn test_coproduct_of_two_expressions() {
        let result = coproduct::<SimpleVectorCoExprParam>(
            &(sv(&[1]) - sv(&[2])),
            &(sv(&[3]) + sv(&[4]) * 3),
        );
        assert_eq!(
            result,
            co_sv(&[&[1], &[3]]) + co_sv(&[&[1], &[4]]) * 3
                - co_sv(&[&[2], &[3]])
                - co_sv(&[&[2], &[4]]) * 3
        );
    }

    #[test]
    fn test_comultiply_form_1_1() {
        let result = comultiply::<SimpleVectorCoExprParam>(&(sv(&[1, 2]) * 2), &[1, 1]);
        assert_eq!(result, co_sv(&[&[1], &[2]]) * 2);
    }

    #[test]
    fn test_comultiply_form_2_2() {
        let result =
            comultiply::<SimpleVectorCoExprParam>(&(sv(&[1, 3, 2, 4]) + sv(&[4, 3, 2, 1])), &[2, 2]);
        assert_eq!(
            result,
            co_sv(&[&[1, 3], &[2, 4]]) - co_sv(&[&[1, 2], &[3, 4]])
        );
    }

    #[test]
    fn test_comultiply_repeated_pair_cancels() {
        let result = comultiply::<SimpleVectorCoExprParam>(&sv(&[1, 1, 2, 3]), &[2, 2]);
        assert_eq!(result, SimpleVectorCoExpr::new());
    }

    #[test]
    fn test_comultiply_weight_mismatch_is_zero() {
        let result = comultiply::<SimpleVectorCoExprParam>(&sv(&[1, 2, 3]), &[2, 2]);
        assert!(result.is_zero());
    }

    #[test]
    fn test_comultiply_part_order_is_canonicalized() {
        // The Lie shape orders parts canonically; moving the long part in
        // front costs a sign.
        let result = comultiply::<SimpleVectorCoExprParam>(&sv(&[1, 2, 3]), &[2, 1]);
        assert_eq!(result, -co_sv(&[&[3], &[1, 2]]));

        let result = comultiply::<SimpleVectorCoExprParam>(&sv(&[1, 2, 3]), &[1, 2]);
        assert_eq!(result, co_sv(&[&[1], &[2, 3]]));
    }

    /// Iterated (non-Lie) co-expression shape over the same family, used by
    /// the deconcatenation tests.
    pub struct IteratedCoExprParam;

    impl ExprParam for IteratedCoExprParam {
        type Object = Vec<Vec<i32>>;
        type Storage = PVector<PVector<i32, 10>, 4>;

        fn object_to_key(obj: &Self::Object) -> Self::Storage {
            SimpleVectorCoExprParam::object_to_key(obj)
        }

        fn key_to_object(key: &Self::Storage) -> Self::Object {
            SimpleVectorCoExprParam::key_to_object(key)
        }

        fn object_to_string(obj: &Self::Object) -> String {
            notation::join(
                obj.iter().map(SimpleVectorExprParam::object_to_string),
                notation::COPROD_ITERATED,
            )
        }

        fn object_to_weight(obj: &Self::Object) -> i32 {
            SimpleVectorCoExprParam::object_to_weight(obj)
        }
    }

    impl VectorParam for IteratedCoExprParam {
        type Letter = PVector<i32, 10>;

        const LYNDON_ORDER: LyndonOrder = LyndonOrder::LengthFirst;

        fn key_to_letters(key: &Self::Storage) -> Vec<Self::Letter> {
            key.to_vec()
        }

        fn letters_to_key(letters: &[Self::Letter]) -> Self::Storage {
            PVector::from_slice(letters)
        }
    }

    impl CoExprParam for IteratedCoExprParam {
        type PartParam = SimpleVectorExprParam;

        const IS_LIE_ALGEBRA: bool = false;
        const IS_ITERATED: bool = true;
    }

    #[test]
    fn test_deconcatenation_produces_n_plus_1_pairs() {
        let result = deconcatenation_coproduct::<IteratedCoExprParam>(&sv(&[1, 2, 3]));
        let expected = co_iterated(&[&[], &[1, 2, 3]])
            + co_iterated(&[&[1], &[2, 3]])
            + co_iterated(&[&[1, 2], &[3]])
            + co_iterated(&[&[1, 2, 3], &[]]);
        assert_eq!(result.num_terms(), 4);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_deconcatenation_graded_piece_matches_comultiply() {
        // The (2,2) graded piece of the deconcatenation coproduct of a
        // canonically ordered term equals its (2,2) comultiplication.
        let expr = sv(&[1, 3, 2, 4]);
        let graded = deconcatenation_coproduct::<IteratedCoExprParam>(&expr)
            .filtered(|parts| parts.iter().all(|part| part.len() == 2));
        assert_eq!(graded, co_iterated(&[&[1, 3], &[2, 4]]));

        let comultiplied = comultiply::<SimpleVectorCoExprParam>(&expr, &[2, 2]);
        assert_eq!(comultiplied, co_sv(&[&[1, 3], &[2, 4]]));
    }

    fn co_iterated(parts: &[&[i32]]) -> Linear<IteratedCoExprParam> {
        Linear::single(parts.iter().map(|part| part.to_vec()).collect())
    }

    #[test]
    fn test_filter_coexpr_part() {
        let expr = co_iterated(&[&[1], &[2, 3]]) + co_iterated(&[&[2], &[2, 3]]);
        let filtered = filtered_coexpr_part(&expr, 0, |part| part == &[1]);
        assert_eq!(filtered, co_iterated(&[&[1], &[2, 3]]));
    }
}
