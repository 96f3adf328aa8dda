//! Canonical term orderings.
//!
//! Every expression family picks one of these policies for its Lyndon
//! canonicalization. The policy fixes a total order on the *letters* of a
//! term (generators for plain expressions, whole parts for co-expressions);
//! words are then compared lexicographically over that letter order.
//!
//! Whether the Lie-algebra order should become the default for all
//! co-expression types is left open upstream, so both remain selectable.

use std::cmp::Ordering;

/// A letter of a term viewed as a word.
///
/// For plain expressions letters are single generators (`length() == 1`);
/// for co-expressions letters are whole parts and `length()` is the part
/// weight, which the length-sensitive orderings consult.
pub trait LyndonLetter: Clone + Ord {
    /// The size of this letter as seen by length-first orderings.
    fn length(&self) -> usize {
        1
    }
}

impl LyndonLetter for u8 {}
impl LyndonLetter for i32 {}

// A compressed part key acts as a letter at the co-expression level; its
// length is the number of generators in the part.
impl<T: Clone + Ord, const N: usize> LyndonLetter for crate::pvector::PVector<T, N> {
    fn length(&self) -> usize {
        self.len()
    }
}

/// The selectable letter-order policies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LyndonOrder {
    /// Plain lexicographic order on letters. Used by simple expressions.
    #[default]
    Default,
    /// Shorter letters order first, ties broken lexicographically.
    /// Used by iterated co-expressions, where the outer structure groups
    /// parts by weight.
    LengthFirst,
    /// Longer letters order first, ties broken lexicographically.
    /// The Lie-algebra order required by coalgebra antisymmetrization.
    DescLengthFirst,
}

impl LyndonOrder {
    /// Compares two letters under this policy.
    #[must_use]
    pub fn compare_letters<L: LyndonLetter>(self, a: &L, b: &L) -> Ordering {
        match self {
            LyndonOrder::Default => a.cmp(b),
            LyndonOrder::LengthFirst => a.length().cmp(&b.length()).then_with(|| a.cmp(b)),
            LyndonOrder::DescLengthFirst => b.length().cmp(&a.length()).then_with(|| a.cmp(b)),
        }
    }

    /// Compares two words lexicographically over this letter order.
    ///
    /// A proper prefix orders before the longer word, matching the
    /// suffix-based Lyndon word criterion.
    #[must_use]
    pub fn compare_words<L: LyndonLetter>(self, a: &[L], b: &[L]) -> Ordering {
        for (x, y) in a.iter().zip(b.iter()) {
            match self.compare_letters(x, y) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        a.len().cmp(&b.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lex() {
        let ord = LyndonOrder::Default;
        assert_eq!(ord.compare_words(&[1u8, 2], &[1, 3]), Ordering::Less);
        assert_eq!(ord.compare_words(&[1u8], &[1, 3]), Ordering::Less);
        assert_eq!(ord.compare_words(&[2u8], &[1, 3]), Ordering::Greater);
    }

    #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
    struct Part(Vec<u8>);

    impl LyndonLetter for Part {
        fn length(&self) -> usize {
            self.0.len()
        }
    }

    #[test]
    fn test_length_first_orders_short_parts_first() {
        let ord = LyndonOrder::LengthFirst;
        let short = Part(vec![9]);
        let long = Part(vec![1, 2]);
        assert_eq!(ord.compare_letters(&short, &long), Ordering::Less);
    }

    #[test]
    fn test_lie_algebra_order_is_descending_by_length() {
        let ord = LyndonOrder::DescLengthFirst;
        let short = Part(vec![9]);
        let long = Part(vec![1, 2]);
        assert_eq!(ord.compare_letters(&long, &short), Ordering::Less);
        // Equal lengths fall back to lexicographic.
        let a = Part(vec![1, 2]);
        let b = Part(vec![1, 3]);
        assert_eq!(ord.compare_letters(&a, &b), Ordering::Less);
    }
}
