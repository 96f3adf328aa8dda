//! Sparse linear combinations with integer coefficients.
//!
//! `Linear<P>` is the single container every symbol family in the workspace
//! parameterizes: a map from a canonical, compressed term key to a non-zero
//! integer coefficient. All algebra reduces to the accumulate-and-cancel
//! rule, which is commutative and associative, so combinations built in any
//! insertion order compare equal.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use rustc_hash::FxHashMap;

use crate::notation;

/// A parameterization of the linear-combination engine.
///
/// The *object* form is what callers construct and inspect; the *storage*
/// form is the compressed key the container hashes, orders and stores.
/// Converting between them must be a pure function of term content.
pub trait ExprParam {
    /// The term as callers see it (e.g. `Vec<Delta>`).
    type Object: Clone;
    /// The compressed term key (e.g. `PVector<u8, 10>`).
    type Storage: Clone + Eq + Ord + Hash;

    /// Compresses a term. Only called on non-nil terms.
    fn object_to_key(obj: &Self::Object) -> Self::Storage;

    /// Expands a compressed key back into a term.
    fn key_to_object(key: &Self::Storage) -> Self::Object;

    /// Renders a term for display. Never affects equality or hashing.
    fn object_to_string(obj: &Self::Object) -> String;

    /// The weight of a term (generator count, or the declared weight of an
    /// embedded formal symbol).
    fn object_to_weight(obj: &Self::Object) -> i32;

    /// The dimension of a term (Grassmannian families only).
    ///
    /// # Panics
    ///
    /// Panics for families that have no notion of dimension.
    fn object_to_dimension(_obj: &Self::Object) -> i32 {
        panic!("dimension is not defined for this expression type");
    }

    /// True if the term is semantically zero (contains a nil generator).
    /// Such terms are silently dropped by every insertion path.
    fn object_is_nil(_obj: &Self::Object) -> bool {
        false
    }
}

/// A sparse linear combination of canonical terms over `i64` coefficients.
pub struct Linear<P: ExprParam> {
    terms: FxHashMap<P::Storage, i64>,
    annotations: BTreeSet<String>,
}

impl<P: ExprParam> Linear<P> {
    /// Creates the zero combination.
    #[must_use]
    pub fn new() -> Self {
        Self {
            terms: FxHashMap::default(),
            annotations: BTreeSet::new(),
        }
    }

    /// Creates a combination holding one term with coefficient 1.
    ///
    /// A nil term yields the zero combination.
    #[must_use]
    pub fn single(obj: P::Object) -> Self {
        let mut ret = Self::new();
        ret.add_to(&obj, 1);
        ret
    }

    /// Creates a combination holding one pre-compressed term.
    #[must_use]
    pub fn single_key(key: P::Storage) -> Self {
        let mut ret = Self::new();
        ret.add_to_key(key, 1);
        ret
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of stored terms.
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Returns the sum of absolute coefficient values.
    #[must_use]
    pub fn l1_norm(&self) -> i64 {
        self.terms.values().map(|c| c.abs()).sum()
    }

    /// Accumulates `coeff` onto a term, dropping the entry if the sum
    /// cancels to zero. Nil terms and zero coefficients are no-ops.
    pub fn add_to(&mut self, obj: &P::Object, coeff: i64) {
        if coeff == 0 || P::object_is_nil(obj) {
            return;
        }
        self.add_to_key(P::object_to_key(obj), coeff);
    }

    /// Accumulates `coeff` onto a pre-compressed term key.
    pub fn add_to_key(&mut self, key: P::Storage, coeff: i64) {
        if coeff == 0 {
            return;
        }
        match self.terms.entry(key) {
            std::collections::hash_map::Entry::Occupied(mut entry) => {
                *entry.get_mut() += coeff;
                if *entry.get() == 0 {
                    entry.remove();
                }
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(coeff);
            }
        }
    }

    /// Returns the coefficient of a term, zero if absent.
    #[must_use]
    pub fn coeff_for(&self, obj: &P::Object) -> i64 {
        if P::object_is_nil(obj) {
            return 0;
        }
        self.coeff_for_key(&P::object_to_key(obj))
    }

    /// Returns the coefficient of a compressed term key, zero if absent.
    #[must_use]
    pub fn coeff_for_key(&self, key: &P::Storage) -> i64 {
        self.terms.get(key).copied().unwrap_or(0)
    }

    /// Iterates over `(key, coeff)` pairs in unspecified order.
    pub fn iter_keys(&self) -> impl Iterator<Item = (&P::Storage, i64)> {
        self.terms.iter().map(|(k, &c)| (k, c))
    }

    /// Calls `f` for every `(term, coeff)` pair, expanding keys to objects.
    pub fn foreach(&self, mut f: impl FnMut(P::Object, i64)) {
        for (key, &coeff) in &self.terms {
            f(P::key_to_object(key), coeff);
        }
    }

    /// Returns `(key, coeff)` pairs sorted by the canonical key order.
    #[must_use]
    pub fn sorted_keys(&self) -> Vec<(P::Storage, i64)> {
        let mut ret: Vec<_> = self.terms.iter().map(|(k, &c)| (k.clone(), c)).collect();
        ret.sort_by(|a, b| a.0.cmp(&b.0));
        ret
    }

    /// Applies a term-to-term transform, re-accumulating collisions.
    #[must_use]
    pub fn mapped<Q: ExprParam>(&self, f: impl Fn(&P::Object) -> Q::Object) -> Linear<Q> {
        let mut ret = Linear::<Q>::new();
        for (key, &coeff) in &self.terms {
            ret.add_to(&f(&P::key_to_object(key)), coeff);
        }
        ret.annotations.clone_from(&self.annotations);
        ret
    }

    /// Applies a key-to-key transform without expanding objects.
    #[must_use]
    pub fn mapped_key<Q: ExprParam>(&self, f: impl Fn(&P::Storage) -> Q::Storage) -> Linear<Q> {
        let mut ret = Linear::<Q>::new();
        for (key, &coeff) in &self.terms {
            ret.add_to_key(f(key), coeff);
        }
        ret.annotations.clone_from(&self.annotations);
        ret
    }

    /// Applies a term-to-combination transform: each source term may expand
    /// into a whole combination, scaled by the source coefficient.
    #[must_use]
    pub fn mapped_expanding<Q: ExprParam>(
        &self,
        f: impl Fn(&P::Object) -> Linear<Q>,
    ) -> Linear<Q> {
        let mut ret = Linear::<Q>::new();
        for (key, &coeff) in &self.terms {
            let expansion = f(&P::key_to_object(key));
            for (new_key, new_coeff) in &expansion.terms {
                ret.add_to_key(new_key.clone(), new_coeff * coeff);
            }
        }
        ret.annotations.clone_from(&self.annotations);
        ret
    }

    /// Keeps only terms satisfying the predicate; coefficients unchanged.
    #[must_use]
    pub fn filtered(&self, pred: impl Fn(&P::Object) -> bool) -> Self {
        self.filtered_key(|key| pred(&P::key_to_object(key)))
    }

    /// Key-level variant of [`Linear::filtered`].
    #[must_use]
    pub fn filtered_key(&self, pred: impl Fn(&P::Storage) -> bool) -> Self {
        let mut ret = Self::new();
        for (key, &coeff) in &self.terms {
            if pred(key) {
                ret.add_to_key(key.clone(), coeff);
            }
        }
        ret.annotations.clone_from(&self.annotations);
        ret
    }

    /// Returns true if any term satisfies the predicate.
    #[must_use]
    pub fn contains(&self, pred: impl Fn(&P::Object) -> bool) -> bool {
        self.terms.keys().any(|key| pred(&P::key_to_object(key)))
    }

    /// Returns the common weight of all terms.
    ///
    /// # Panics
    ///
    /// Panics on the zero combination (weight is undefined, not zero) and
    /// on non-homogeneous combinations.
    #[must_use]
    pub fn weight(&self) -> i32 {
        assert!(!self.is_zero(), "weight is undefined for the zero expression");
        let mut weights = self
            .terms
            .keys()
            .map(|key| P::object_to_weight(&P::key_to_object(key)));
        let first = weights.next().unwrap();
        assert!(
            weights.all(|w| w == first),
            "weight query on a non-homogeneous expression"
        );
        first
    }

    /// Returns the common dimension of all terms (Grassmannian families).
    ///
    /// # Panics
    ///
    /// Panics on the zero combination and on mixed-dimension combinations.
    #[must_use]
    pub fn dimension(&self) -> i32 {
        assert!(
            !self.is_zero(),
            "dimension is undefined for the zero expression"
        );
        let mut dims = self
            .terms
            .keys()
            .map(|key| P::object_to_dimension(&P::key_to_object(key)));
        let first = dims.next().unwrap();
        assert!(
            dims.all(|d| d == first),
            "dimension query on a mixed-dimension expression"
        );
        first
    }

    /// Attaches a display label. Labels never affect algebraic equality.
    #[must_use]
    pub fn annotate(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.insert(annotation.into());
        self
    }

    /// Returns the attached display labels.
    #[must_use]
    pub fn annotations(&self) -> &BTreeSet<String> {
        &self.annotations
    }

    /// Returns a copy with all display labels removed.
    #[must_use]
    pub fn without_annotations(&self) -> Self {
        Self {
            terms: self.terms.clone(),
            annotations: BTreeSet::new(),
        }
    }

    /// Copies the labels of `other` onto `self`. The source may be of a
    /// different parameterization (labels are plain strings).
    #[must_use]
    pub fn copy_annotations_from<Q: ExprParam>(mut self, other: &Linear<Q>) -> Self {
        self.annotations
            .extend(other.annotations.iter().cloned());
        self
    }

    /// Partitions terms into sub-combinations by a caller-supplied
    /// classifier. Read-only: the union of the groups is the original
    /// combination, labels excluded.
    #[must_use]
    pub fn grouped_by<K: Ord>(&self, classifier: impl Fn(&P::Object) -> K) -> BTreeMap<K, Self> {
        let mut groups: BTreeMap<K, Self> = BTreeMap::new();
        for (key, &coeff) in &self.terms {
            let class = classifier(&P::key_to_object(key));
            groups
                .entry(class)
                .or_insert_with(Self::new)
                .add_to_key(key.clone(), coeff);
        }
        groups
    }
}

impl<P: ExprParam> Default for Linear<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ExprParam> Clone for Linear<P> {
    fn clone(&self) -> Self {
        Self {
            terms: self.terms.clone(),
            annotations: self.annotations.clone(),
        }
    }
}

impl<P: ExprParam> PartialEq for Linear<P> {
    fn eq(&self, other: &Self) -> bool {
        // Labels are display-only: equality is the term maps alone.
        self.terms == other.terms
    }
}

impl<P: ExprParam> Eq for Linear<P> {}

impl<P: ExprParam> AddAssign<&Linear<P>> for Linear<P> {
    fn add_assign(&mut self, rhs: &Linear<P>) {
        for (key, &coeff) in &rhs.terms {
            self.add_to_key(key.clone(), coeff);
        }
        self.annotations.extend(rhs.annotations.iter().cloned());
    }
}

impl<P: ExprParam> AddAssign for Linear<P> {
    fn add_assign(&mut self, rhs: Self) {
        *self += &rhs;
    }
}

impl<P: ExprParam> SubAssign<&Linear<P>> for Linear<P> {
    fn sub_assign(&mut self, rhs: &Linear<P>) {
        for (key, &coeff) in &rhs.terms {
            self.add_to_key(key.clone(), -coeff);
        }
        self.annotations.extend(rhs.annotations.iter().cloned());
    }
}

impl<P: ExprParam> SubAssign for Linear<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self -= &rhs;
    }
}

impl<P: ExprParam> Add for Linear<P> {
    type Output = Linear<P>;

    fn add(mut self, rhs: Self) -> Self {
        self += &rhs;
        self
    }
}

impl<P: ExprParam> Add for &Linear<P> {
    type Output = Linear<P>;

    fn add(self, rhs: Self) -> Linear<P> {
        let mut ret = self.clone();
        ret += rhs;
        ret
    }
}

impl<P: ExprParam> Sub for Linear<P> {
    type Output = Linear<P>;

    fn sub(mut self, rhs: Self) -> Self {
        self -= &rhs;
        self
    }
}

impl<P: ExprParam> Sub for &Linear<P> {
    type Output = Linear<P>;

    fn sub(self, rhs: Self) -> Linear<P> {
        let mut ret = self.clone();
        ret -= rhs;
        ret
    }
}

impl<P: ExprParam> Neg for Linear<P> {
    type Output = Linear<P>;

    fn neg(self) -> Linear<P> {
        self * -1
    }
}

impl<P: ExprParam> Mul<i64> for Linear<P> {
    type Output = Linear<P>;

    fn mul(mut self, scalar: i64) -> Linear<P> {
        if scalar == 0 {
            self.terms.clear();
            return self;
        }
        for coeff in self.terms.values_mut() {
            *coeff *= scalar;
        }
        self
    }
}

impl<P: ExprParam> Mul<Linear<P>> for i64 {
    type Output = Linear<P>;

    fn mul(self, expr: Linear<P>) -> Linear<P> {
        expr * self
    }
}

impl<P: ExprParam> fmt::Display for Linear<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            writeln!(f, "0")?;
        } else {
            for (key, coeff) in self.sorted_keys() {
                let obj = P::key_to_object(&key);
                writeln!(
                    f,
                    "{} {}",
                    notation::coeff_prefix(coeff),
                    P::object_to_string(&obj)
                )?;
            }
        }
        for annotation in &self.annotations {
            writeln!(f, "  ~ {annotation}")?;
        }
        Ok(())
    }
}

impl<P: ExprParam> fmt::Debug for Linear<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
