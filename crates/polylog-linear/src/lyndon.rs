//! Lyndon-word canonicalization.
//!
//! Coproduct identities are tested modulo shuffle products, and the Lyndon
//! words form a basis of that quotient. `to_lyndon_basis` rewrites every
//! non-Lyndon term through the shuffle relation of its Lyndon factorization
//! until only Lyndon words remain. Because every rewrite produces strictly
//! smaller words under the family's letter order, processing terms in
//! descending order terminates.
//!
//! The same machinery runs at two levels: over generators for plain
//! expressions, and over whole parts for Lie co-expressions (where the
//! rewriting degenerates to the cobracket antisymmetry `x ∧ x = 0`,
//! `y ⊗ x = −x ⊗ y`).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::hash::Hash;
use std::marker::PhantomData;

use rustc_hash::FxHashMap;

use crate::linear::{ExprParam, Linear};
use crate::ordering::{LyndonLetter, LyndonOrder};

/// An expression parameterization whose terms decompose into a word of
/// letters, enabling Lyndon canonicalization.
pub trait VectorParam: ExprParam {
    /// The letter type: a generator code for plain expressions, a whole
    /// part key for co-expressions.
    type Letter: LyndonLetter + Hash;

    /// The letter-order policy of this family.
    const LYNDON_ORDER: LyndonOrder = LyndonOrder::Default;

    /// Decomposes a term key into its word of letters.
    fn key_to_letters(key: &Self::Storage) -> Vec<Self::Letter>;

    /// Reassembles a term key from a word of letters.
    fn letters_to_key(letters: &[Self::Letter]) -> Self::Storage;
}

/// Tests whether a word is a Lyndon word: non-empty and strictly smaller
/// than every proper suffix under the given order.
#[must_use]
pub fn is_lyndon_word<L: LyndonLetter>(word: &[L], order: LyndonOrder) -> bool {
    if word.is_empty() {
        return false;
    }
    (1..word.len()).all(|i| order.compare_words(word, &word[i..]) == Ordering::Less)
}

/// Computes the Lyndon factorization of a word (Duval's algorithm): the
/// unique decomposition into a non-increasing sequence of Lyndon words.
#[must_use]
pub fn lyndon_factorize<L: LyndonLetter>(word: &[L], order: LyndonOrder) -> Vec<Vec<L>> {
    let n = word.len();
    let mut factors = Vec::new();
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        let mut k = i;
        while j < n && order.compare_letters(&word[k], &word[j]) != Ordering::Greater {
            if order.compare_letters(&word[k], &word[j]) == Ordering::Less {
                k = i;
            } else {
                k += 1;
            }
            j += 1;
        }
        while i <= k {
            factors.push(word[i..i + j - k].to_vec());
            i += j - k;
        }
    }
    factors
}

/// Computes the shuffle product of two words as a multiset of words.
#[must_use]
pub fn shuffle_product<L: LyndonLetter + Hash>(u: &[L], v: &[L]) -> FxHashMap<Vec<L>, i64> {
    fn rec<L: LyndonLetter + Hash>(
        u: &[L],
        v: &[L],
        prefix: &mut Vec<L>,
        out: &mut FxHashMap<Vec<L>, i64>,
    ) {
        if u.is_empty() && v.is_empty() {
            *out.entry(prefix.clone()).or_insert(0) += 1;
            return;
        }
        if let Some((head, tail)) = u.split_first() {
            prefix.push(head.clone());
            rec(tail, v, prefix, out);
            prefix.pop();
        }
        if let Some((head, tail)) = v.split_first() {
            prefix.push(head.clone());
            rec(u, tail, prefix, out);
            prefix.pop();
        }
    }

    let mut out = FxHashMap::default();
    let mut prefix = Vec::with_capacity(u.len() + v.len());
    rec(u, v, &mut prefix, &mut out);
    out
}

/// A word wrapper ordered by the family's letter-order policy.
struct OrderedWord<P: VectorParam> {
    letters: Vec<P::Letter>,
    _param: PhantomData<P>,
}

impl<P: VectorParam> OrderedWord<P> {
    fn new(letters: Vec<P::Letter>) -> Self {
        Self {
            letters,
            _param: PhantomData,
        }
    }
}

impl<P: VectorParam> PartialEq for OrderedWord<P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<P: VectorParam> Eq for OrderedWord<P> {}

impl<P: VectorParam> PartialOrd for OrderedWord<P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: VectorParam> Ord for OrderedWord<P> {
    fn cmp(&self, other: &Self) -> Ordering {
        P::LYNDON_ORDER.compare_words(&self.letters, &other.letters)
    }
}

/// Rewrites an expression in the Lyndon-word basis, modulo shuffle
/// products.
///
/// Lyndon terms pass through unchanged. A non-Lyndon word `w` with Lyndon
/// factorization `w = u · v` (`u` the first factor) is the maximal word of
/// the shuffle `u ⧢ v`, so modulo shuffles
/// `w ≡ −(1/m) · Σ other words of u ⧢ v` where `m` is the multiplicity of
/// `w` in the shuffle. The quotient has torsion only in degenerate repeated
/// cases where the remaining counts stay divisible; a non-divisible
/// coefficient indicates a caller bug and panics.
///
/// Examples: a single term `{4,3}` becomes `−{3,4}`; `{1,1}` cancels to
/// zero.
#[must_use]
pub fn to_lyndon_basis<P: VectorParam>(expr: &Linear<P>) -> Linear<P> {
    let mut pending: BTreeMap<OrderedWord<P>, i64> = BTreeMap::new();
    for (key, coeff) in expr.iter_keys() {
        *pending
            .entry(OrderedWord::new(P::key_to_letters(key)))
            .or_insert(0) += coeff;
    }

    let mut ret = Linear::<P>::new();
    while let Some((word, coeff)) = pending.pop_last() {
        if coeff == 0 {
            continue;
        }
        // The empty word (shuffle unity) is its own basis element.
        if word.letters.is_empty() || is_lyndon_word(&word.letters, P::LYNDON_ORDER) {
            ret.add_to_key(P::letters_to_key(&word.letters), coeff);
            continue;
        }

        let factors = lyndon_factorize(&word.letters, P::LYNDON_ORDER);
        debug_assert!(factors.len() >= 2);
        let u = &factors[0];
        let v: Vec<P::Letter> = factors[1..].concat();
        let shuffle = shuffle_product(u, &v);
        let multiplicity = *shuffle
            .get(&word.letters)
            .expect("concatenation of Lyndon factors must occur in their shuffle");

        for (other, count) in shuffle {
            if other == word.letters {
                continue;
            }
            let numerator = coeff * count;
            assert!(
                numerator % multiplicity == 0,
                "non-integral Lyndon reduction: coefficient {coeff} with \
                 shuffle counts {count}/{multiplicity}"
            );
            *pending.entry(OrderedWord::new(other)).or_insert(0) -= numerator / multiplicity;
        }
    }

    ret.copy_annotations_from(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::WordExpr;

    fn word(letters: &[i32]) -> WordExpr {
        WordExpr::single(letters.to_vec())
    }

    #[test]
    fn test_lyndon_word_criterion() {
        let ord = LyndonOrder::Default;
        assert!(is_lyndon_word(&[1], ord));
        assert!(is_lyndon_word(&[1, 2], ord));
        assert!(is_lyndon_word(&[1, 3, 2, 4], ord));
        assert!(!is_lyndon_word(&[2, 1], ord));
        assert!(!is_lyndon_word(&[1, 1], ord));
        assert!(!is_lyndon_word::<i32>(&[], ord));
    }

    #[test]
    fn test_duval_factorization() {
        let ord = LyndonOrder::Default;
        assert_eq!(
            lyndon_factorize(&[4, 3, 2, 1], ord),
            vec![vec![4], vec![3], vec![2], vec![1]]
        );
        assert_eq!(lyndon_factorize(&[1, 2, 1, 2], ord), vec![vec![1, 2]; 2]);
        assert_eq!(lyndon_factorize(&[2, 1, 3], ord), vec![vec![2], vec![1, 3]]);
    }

    #[test]
    fn test_shuffle_product_counts() {
        let shuffle = shuffle_product(&[1], &[1]);
        assert_eq!(shuffle.get(&vec![1, 1]), Some(&2));

        let shuffle = shuffle_product(&[2], &[1, 3]);
        assert_eq!(shuffle.get(&vec![2, 1, 3]), Some(&1));
        assert_eq!(shuffle.get(&vec![1, 2, 3]), Some(&1));
        assert_eq!(shuffle.get(&vec![1, 3, 2]), Some(&1));
        assert_eq!(shuffle.len(), 3);
    }

    #[test]
    fn test_lyndon_terms_pass_through() {
        let expr = word(&[1, 3, 2, 4]) + word(&[1, 2]) * 3;
        assert_eq!(to_lyndon_basis(&expr), expr);
    }

    #[test]
    fn test_descending_pair_flips_sign() {
        assert_eq!(to_lyndon_basis(&word(&[4, 3])), -word(&[3, 4]));
    }

    #[test]
    fn test_repeated_letter_cancels() {
        assert!(to_lyndon_basis(&word(&[1, 1])).is_zero());
    }

    #[test]
    fn test_three_letter_reduction() {
        assert_eq!(
            to_lyndon_basis(&word(&[2, 1, 3])),
            -word(&[1, 2, 3]) - word(&[1, 3, 2])
        );
    }

    #[test]
    fn test_reduction_is_linear() {
        let a = word(&[4, 3]) + word(&[3, 4]);
        // {4,3} + {3,4} is a full shuffle, hence zero in the quotient.
        assert!(to_lyndon_basis(&a).is_zero());
    }
}
