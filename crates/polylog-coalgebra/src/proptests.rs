//! Property-based tests for the coalgebra laws.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::coproduct::{comultiply, coproduct};
    use crate::simple::{SimpleVectorCoExprParam, SimpleVectorExpr};
    use crate::tensor::tensor_product;

    fn small_word() -> impl Strategy<Value = Vec<i32>> {
        proptest::collection::vec(1i32..5, 1..=3)
    }

    fn small_expr() -> impl Strategy<Value = SimpleVectorExpr> {
        proptest::collection::vec((small_word(), -3i64..=3), 0..4).prop_map(|terms| {
            let mut expr = SimpleVectorExpr::new();
            for (word, coeff) in terms {
                expr.add_to(&word, coeff);
            }
            expr
        })
    }

    fn homogeneous_expr(weight: usize) -> impl Strategy<Value = SimpleVectorExpr> {
        proptest::collection::vec(
            (proptest::collection::vec(1i32..5, weight), -3i64..=3),
            0..4,
        )
        .prop_map(|terms| {
            let mut expr = SimpleVectorExpr::new();
            for (word, coeff) in terms {
                expr.add_to(&word, coeff);
            }
            expr
        })
    }

    proptest! {
        #[test]
        fn tensor_product_left_distributes(a in small_expr(), b in small_expr(), c in small_expr()) {
            prop_assert_eq!(
                tensor_product(&(&a + &b), &c),
                tensor_product(&a, &c) + tensor_product(&b, &c)
            );
        }

        #[test]
        fn tensor_product_right_distributes(a in small_expr(), b in small_expr(), c in small_expr()) {
            prop_assert_eq!(
                tensor_product(&a, &(&b + &c)),
                tensor_product(&a, &b) + tensor_product(&a, &c)
            );
        }

        #[test]
        fn tensor_product_associative(a in small_expr(), b in small_expr(), c in small_expr()) {
            prop_assert_eq!(
                tensor_product(&tensor_product(&a, &b), &c),
                tensor_product(&a, &tensor_product(&b, &c))
            );
        }

        #[test]
        fn coproduct_is_bilinear(a in small_expr(), b in small_expr(), c in small_expr()) {
            prop_assert_eq!(
                coproduct::<SimpleVectorCoExprParam>(&(&a + &b), &c),
                coproduct::<SimpleVectorCoExprParam>(&a, &c)
                    + coproduct::<SimpleVectorCoExprParam>(&b, &c)
            );
        }

        #[test]
        fn comultiply_is_linear(a in homogeneous_expr(4), b in homogeneous_expr(4)) {
            prop_assert_eq!(
                comultiply::<SimpleVectorCoExprParam>(&(&a + &b), &[2, 2]),
                comultiply::<SimpleVectorCoExprParam>(&a, &[2, 2])
                    + comultiply::<SimpleVectorCoExprParam>(&b, &[2, 2])
            );
        }

        #[test]
        fn comultiply_ignores_off_weight_terms(a in homogeneous_expr(3)) {
            prop_assert!(comultiply::<SimpleVectorCoExprParam>(&a, &[2, 2]).is_zero());
        }
    }
}
