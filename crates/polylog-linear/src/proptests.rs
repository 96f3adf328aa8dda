//! Property-based tests for the linear-combination laws.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::test_util::{WordExpr, WordExprParam};

    // Strategy for short words over a small alphabet
    fn small_word() -> impl Strategy<Value = Vec<i32>> {
        proptest::collection::vec(1i32..5, 1..=4)
    }

    // Strategy for small expressions (a handful of terms)
    fn small_expr() -> impl Strategy<Value = WordExpr> {
        proptest::collection::vec((small_word(), -4i64..=4), 0..6).prop_map(|terms| {
            let mut expr = WordExpr::new();
            for (word, coeff) in terms {
                expr.add_to(&word, coeff);
            }
            expr
        })
    }

    proptest! {
        // Abelian group axioms under the accumulate-and-cancel rule

        #[test]
        fn add_commutative(a in small_expr(), b in small_expr()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn add_associative(a in small_expr(), b in small_expr(), c in small_expr()) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }

        #[test]
        fn add_identity(a in small_expr()) {
            prop_assert_eq!(&a + &WordExpr::new(), a.clone());
        }

        #[test]
        fn additive_inverse_cancels(a in small_expr()) {
            prop_assert!((&a - &a).is_zero());
        }

        #[test]
        fn scalar_mul_distributes(a in small_expr(), b in small_expr(), k in -5i64..=5) {
            let lhs = (&a + &b) * k;
            let rhs = a * k + b * k;
            prop_assert_eq!(lhs, rhs);
        }

        // Canonicalization determinism: insertion order is never observable

        #[test]
        fn insertion_order_is_irrelevant(terms in proptest::collection::vec((small_word(), -3i64..=3), 0..6)) {
            let mut forward = WordExpr::new();
            for (word, coeff) in &terms {
                forward.add_to(word, *coeff);
            }
            let mut backward = WordExpr::new();
            for (word, coeff) in terms.iter().rev() {
                backward.add_to(word, *coeff);
            }
            prop_assert_eq!(forward, backward);
        }

        // Mapping laws

        #[test]
        fn mapped_identity_is_identity(a in small_expr()) {
            prop_assert_eq!(a.mapped::<WordExprParam>(Clone::clone), a.clone());
        }

        #[test]
        fn mapped_expanding_scales_by_coeff(a in small_expr(), k in -3i64..=3) {
            let expanded = a.mapped_expanding::<WordExprParam>(|word| {
                WordExpr::single(word.clone()) * k
            });
            prop_assert_eq!(expanded, a * k);
        }

        #[test]
        fn filtered_partitions_expression(a in small_expr()) {
            let kept = a.filtered(|word| word.len() % 2 == 0);
            let dropped = a.filtered(|word| word.len() % 2 != 0);
            prop_assert_eq!(kept + dropped, a);
        }

        // Annotations never affect algebraic identity

        #[test]
        fn annotations_do_not_affect_equality(a in small_expr()) {
            let labeled = a.clone().annotate("left label");
            let other = a.clone().annotate("right label");
            prop_assert_eq!(labeled, other);
        }
    }
}
