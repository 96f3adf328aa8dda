//! Differences of extended points: the basic symbol alphabet.
//!
//! A `Delta` is one tensor factor `(a - b)` over extended points. The whole
//! bounded universe of deltas is enumerated once into a process-wide
//! alphabet table, so a term compresses to a `PVector<u8, _>` of alphabet
//! codes, one byte per factor, with no heap allocation on the hot paths.

use std::fmt;

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

use polylog_coalgebra::coexpr::CoExprParam;
use polylog_coalgebra::tensor::{tensor_product_all, TensorParam};
use polylog_linear::linear::{ExprParam, Linear};
use polylog_linear::lyndon::VectorParam;
use polylog_linear::notation;
use polylog_linear::ordering::LyndonOrder;
use polylog_linear::pvector::PVector;

use crate::x::X;

/// The largest variable index the delta alphabet covers.
///
/// The alphabet enumerates every difference over `x_1..x_N`, their
/// negations and zero; exceeding this bound at construction time is a
/// configuration error and panics.
pub const MAX_DELTA_VARIABLES: i32 = 11;

/// A difference of two extended points, stored with endpoints normalized
/// to the canonical point order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Delta {
    a: X,
    b: X,
}

impl Delta {
    /// Creates a difference, normalizing endpoint order.
    #[must_use]
    pub fn new(a: impl Into<X>, b: impl Into<X>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }

    /// The first (smaller) endpoint.
    #[must_use]
    pub fn a(self) -> X {
        self.a
    }

    /// The second (larger) endpoint.
    #[must_use]
    pub fn b(self) -> X {
        self.b
    }

    /// True if the difference is degenerate: equal endpoints, or any
    /// undefined endpoint. Nil deltas annihilate their containing term.
    #[must_use]
    pub fn is_nil(self) -> bool {
        self.a == self.b || self.a == X::Undefined || self.b == X::Undefined
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.b {
            X::Zero => write!(f, "({})", self.a),
            X::NegVar(i) => write!(f, "({} + x{i})", self.a),
            _ => write!(f, "({} - {})", self.a, self.b),
        }
    }
}

/// The process-wide alphabet: every delta of the bounded universe mapped to
/// a single byte code and back. Built once, never mutated.
struct DeltaAlphabet {
    deltas: Vec<Delta>,
    codes: FxHashMap<Delta, u8>,
}

impl DeltaAlphabet {
    fn build() -> Self {
        let points: Vec<X> = (1..=MAX_DELTA_VARIABLES)
            .map(X::Var)
            .chain((1..=MAX_DELTA_VARIABLES).map(X::NegVar))
            .chain(std::iter::once(X::Zero))
            .collect();
        let mut deltas = Vec::new();
        let mut codes = FxHashMap::default();
        for b in 0..points.len() {
            for a in 0..b {
                let d = Delta::new(points[a], points[b]);
                let code = u8::try_from(deltas.len()).expect("alphabet fits in u8");
                deltas.push(d);
                codes.insert(d, code);
            }
        }
        Self { deltas, codes }
    }

    fn to_code(&self, d: Delta) -> u8 {
        match self.codes.get(&d) {
            Some(&code) => code,
            None => panic!("delta is outside the alphabet universe: {d}"),
        }
    }

    fn from_code(&self, code: u8) -> Delta {
        self.deltas[usize::from(code)]
    }
}

static ALPHABET: Lazy<DeltaAlphabet> = Lazy::new(DeltaAlphabet::build);

/// Parameterization for plain delta expressions.
pub struct DeltaExprParam;

/// A linear combination of delta terms.
pub type DeltaExpr = Linear<DeltaExprParam>;

impl ExprParam for DeltaExprParam {
    type Object = Vec<Delta>;
    type Storage = PVector<u8, 10>;

    fn object_to_key(obj: &Self::Object) -> Self::Storage {
        obj.iter().map(|&d| ALPHABET.to_code(d)).collect()
    }

    fn key_to_object(key: &Self::Storage) -> Self::Object {
        key.iter().map(|&code| ALPHABET.from_code(code)).collect()
    }

    fn object_to_string(obj: &Self::Object) -> String {
        notation::join(obj.iter().map(ToString::to_string), notation::TENSOR)
    }

    fn object_to_weight(obj: &Self::Object) -> i32 {
        i32::try_from(obj.len()).expect("term weight fits in i32")
    }

    fn object_is_nil(obj: &Self::Object) -> bool {
        obj.iter().any(|d| d.is_nil())
    }
}

impl VectorParam for DeltaExprParam {
    type Letter = u8;

    fn key_to_letters(key: &Self::Storage) -> Vec<u8> {
        key.to_vec()
    }

    fn letters_to_key(letters: &[u8]) -> Self::Storage {
        PVector::from_slice(letters)
    }
}

impl TensorParam for DeltaExprParam {
    fn monom_tensor_product(lhs: &Self::Storage, rhs: &Self::Storage) -> Self::Storage {
        lhs.concat(rhs)
    }
}

/// Iterated co-expression parameterization for delta terms.
pub struct DeltaICoExprParam;

/// An iterated co-expression over delta terms.
pub type DeltaICoExpr = Linear<DeltaICoExprParam>;

/// Normal (iteration-insensitive) co-expression parameterization.
pub struct DeltaNCoExprParam;

/// A normal co-expression over delta terms.
pub type DeltaNCoExpr = Linear<DeltaNCoExprParam>;

macro_rules! delta_co_expr_param {
    ($param:ident, $separator:expr, $is_iterated:expr) => {
        impl ExprParam for $param {
            type Object = Vec<Vec<Delta>>;
            type Storage = PVector<PVector<u8, 10>, 4>;

            fn object_to_key(obj: &Self::Object) -> Self::Storage {
                obj.iter().map(|part| DeltaExprParam::object_to_key(part)).collect()
            }

            fn key_to_object(key: &Self::Storage) -> Self::Object {
                key.iter().map(DeltaExprParam::key_to_object).collect()
            }

            fn object_to_string(obj: &Self::Object) -> String {
                notation::join(obj.iter().map(DeltaExprParam::object_to_string), $separator)
            }

            fn object_to_weight(obj: &Self::Object) -> i32 {
                obj.iter().map(DeltaExprParam::object_to_weight).sum()
            }

            fn object_is_nil(obj: &Self::Object) -> bool {
                obj.iter().any(|part| DeltaExprParam::object_is_nil(part))
            }
        }

        impl VectorParam for $param {
            type Letter = PVector<u8, 10>;

            const LYNDON_ORDER: LyndonOrder = LyndonOrder::LengthFirst;

            fn key_to_letters(key: &Self::Storage) -> Vec<Self::Letter> {
                key.to_vec()
            }

            fn letters_to_key(letters: &[Self::Letter]) -> Self::Storage {
                PVector::from_slice(letters)
            }
        }

        impl CoExprParam for $param {
            type PartParam = DeltaExprParam;

            const IS_LIE_ALGEBRA: bool = true;
            const IS_ITERATED: bool = $is_iterated;
        }
    };
}

delta_co_expr_param!(DeltaICoExprParam, notation::COPROD_ITERATED, true);
delta_co_expr_param!(DeltaNCoExprParam, notation::COPROD_NORMAL, false);

/// Builds a single-factor delta expression. A nil difference yields zero.
#[must_use]
pub fn d(a: impl Into<X>, b: impl Into<X>) -> DeltaExpr {
    DeltaExpr::single(vec![Delta::new(a, b)])
}

fn substitution_result(orig: X, new_points: &[X]) -> X {
    let at = |i: i32| -> X {
        let i = usize::try_from(i - 1).expect("variable index is positive");
        match new_points.get(i) {
            Some(&p) => p,
            None => panic!("substitution index {} out of range", i + 1),
        }
    };
    match orig {
        X::Var(i) => at(i),
        X::NegVar(i) => at(i).negated(),
        X::Zero | X::Infinity => orig,
        X::Undefined => panic!("variable substitution hit an undefined point"),
    }
}

/// Replaces variable `x_i` with `new_points[i - 1]` in every term.
/// Substitutions producing a nil difference annihilate the term.
#[must_use]
pub fn substitute_variables(expr: &DeltaExpr, new_points: &[X]) -> DeltaExpr {
    expr.mapped_expanding(|term: &Vec<Delta>| {
        let mut term_new = Vec::with_capacity(term.len());
        for d_old in term {
            let d_new = Delta::new(
                substitution_result(d_old.a(), new_points),
                substitution_result(d_old.b(), new_points),
            );
            if d_new.is_nil() {
                return DeltaExpr::new();
            }
            term_new.push(d_new);
        }
        DeltaExpr::single(term_new)
    })
    .without_annotations()
}

/// The hexagon involution: rewrites differences touching the last point of
/// a six-point configuration through the defining relations, expanding each
/// term into a tensor product of the per-factor expansions.
///
/// # Panics
///
/// Panics unless exactly six points are given.
#[must_use]
pub fn involute(expr: &DeltaExpr, points: &[i32]) -> DeltaExpr {
    assert_eq!(points.len(), 6, "involution requires six points");
    let [p1, p2, p3, p4, p5, p6] = [
        points[0], points[1], points[2], points[3], points[4], points[5],
    ];
    expr.mapped_expanding(|term: &Vec<Delta>| {
        let factors: Vec<DeltaExpr> = term
            .iter()
            .map(|&delta| {
                if delta == Delta::new(p6, p5) {
                    d(p6, p1) - d(p1, p2) + d(p2, p3) - d(p3, p4) + d(p4, p5)
                } else if delta == Delta::new(p6, p4) {
                    d(p4, p2) + d(p3, p1) - d(p1, p5) + d(p6, p1) - d(p1, p2) - d(p3, p4)
                        + d(p4, p5)
                } else if delta == Delta::new(p6, p2) {
                    d(p6, p1) - d(p1, p5) + d(p5, p3) - d(p3, p4) + d(p4, p2)
                } else {
                    DeltaExpr::single(vec![delta])
                }
            })
            .collect();
        tensor_product_all(&factors)
    })
}

/// Sorts the factors of every term, merging terms that become equal.
#[must_use]
pub fn sort_term_multiples(expr: &DeltaExpr) -> DeltaExpr {
    expr.mapped(|term: &Vec<Delta>| {
        let mut sorted = term.clone();
        sorted.sort_unstable();
        sorted
    })
}

fn has_repeated_factor(term: &[Delta]) -> bool {
    let mut sorted = term.to_vec();
    sorted.sort_unstable();
    sorted.windows(2).any(|w| w[0] == w[1])
}

/// Keeps only terms where every factor appears once.
#[must_use]
pub fn terms_with_unique_multiples(expr: &DeltaExpr) -> DeltaExpr {
    expr.filtered(|term| !has_repeated_factor(term))
}

/// Keeps only terms where some factor repeats.
#[must_use]
pub fn terms_with_nonunique_multiples(expr: &DeltaExpr) -> DeltaExpr {
    expr.filtered(|term| has_repeated_factor(term))
}

/// Counts the distinct variable indices among the non-constant endpoints.
#[must_use]
pub fn num_distinct_variables(term: &[Delta]) -> i32 {
    let mut vars = FxHashSet::default();
    for d in term {
        if !d.a().is_constant() {
            vars.insert(d.a().idx());
        }
        if !d.b().is_constant() {
            vars.insert(d.b().idx());
        }
    }
    i32::try_from(vars.len()).expect("variable count fits in i32")
}

/// Keeps terms with exactly `num_distinct` distinct variables.
#[must_use]
pub fn terms_with_num_distinct_variables(expr: &DeltaExpr, num_distinct: i32) -> DeltaExpr {
    expr.filtered(|term| num_distinct_variables(term) == num_distinct)
}

/// Keeps terms with at least `min_distinct` distinct variables.
#[must_use]
pub fn terms_with_min_distinct_variables(expr: &DeltaExpr, min_distinct: i32) -> DeltaExpr {
    expr.filtered(|term| num_distinct_variables(term) >= min_distinct)
}

fn endpoint_in(set: &FxHashSet<i32>, point: X) -> bool {
    !point.is_constant() && set.contains(&point.idx())
}

/// Keeps terms all of whose variable endpoints lie in `indices`.
#[must_use]
pub fn terms_containing_only_variables(expr: &DeltaExpr, indices: &[i32]) -> DeltaExpr {
    let set: FxHashSet<i32> = indices.iter().copied().collect();
    expr.filtered(|term| {
        term.iter().all(|d| {
            (d.a().is_constant() || endpoint_in(&set, d.a()))
                && (d.b().is_constant() || endpoint_in(&set, d.b()))
        })
    })
}

/// Drops terms containing a difference with both endpoints in `indices`.
#[must_use]
pub fn terms_without_variables(expr: &DeltaExpr, indices: &[i32]) -> DeltaExpr {
    let set: FxHashSet<i32> = indices.iter().copied().collect();
    expr.filtered(|term| {
        !term
            .iter()
            .any(|d| endpoint_in(&set, d.a()) && endpoint_in(&set, d.b()))
    })
}

fn between(point: i32, segment: (i32, i32)) -> bool {
    let (a, b) = segment;
    assert!(a < b);
    a < point && point < b
}

/// Whether two differences are weakly separated.
///
/// Two differences over four distinct simple variables are weakly separated
/// unless their point pairs interleave on the implied cyclic order. Any
/// shared point counts as separated; this tie-break is deliberate and must
/// stay (upstream behavior, not the symmetric mathematical choice).
#[must_use]
pub fn are_weakly_separated(d1: Delta, d2: Delta) -> bool {
    if d1.is_nil() || d2.is_nil() {
        return true;
    }
    let x1 = d1.a().as_simple_var();
    let y1 = d1.b().as_simple_var();
    let x2 = d2.a().as_simple_var();
    let y2 = d2.b().as_simple_var();
    let points = [x1, y1, x2, y2];
    for i in 0..points.len() {
        for j in 0..i {
            if points[i] == points[j] {
                return true;
            }
        }
    }
    let (lo, hi) = if x2 < y2 { (x2, y2) } else { (y2, x2) };
    let intersect = between(x1, (lo, hi)) != between(y1, (lo, hi));
    !intersect
}

/// Whether every pair of factors in a term is weakly separated.
#[must_use]
pub fn is_weakly_separated(term: &[Delta]) -> bool {
    for i in 0..term.len() {
        for j in 0..i {
            if !are_weakly_separated(term[i], term[j]) {
                return false;
            }
        }
    }
    true
}

/// Co-expression variant: flattens the parts and checks all factor pairs.
#[must_use]
pub fn is_weakly_separated_co(term: &[Vec<Delta>]) -> bool {
    let flat: Vec<Delta> = term.iter().flatten().copied().collect();
    is_weakly_separated(&flat)
}

/// Whether every term of the expression is weakly separated.
#[must_use]
pub fn is_totally_weakly_separated(expr: &DeltaExpr) -> bool {
    !expr.contains(|term| !is_weakly_separated(term))
}

/// Keeps only the terms that are not weakly separated.
#[must_use]
pub fn keep_non_weakly_separated(expr: &DeltaExpr) -> DeltaExpr {
    expr.filtered(|term| !is_weakly_separated(term))
}

/// Whether no factor of the term is a difference of consecutive variables.
#[must_use]
pub fn passes_normalize_remove_consecutive(term: &[Delta]) -> bool {
    term.iter().all(|d| {
        let mut a = d.a().as_simple_var();
        let mut b = d.b().as_simple_var();
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        b != a + 1
    })
}

/// Drops terms containing a difference of consecutive variables.
#[must_use]
pub fn normalize_remove_consecutive(expr: &DeltaExpr) -> DeltaExpr {
    expr.filtered(|term| passes_normalize_remove_consecutive(term))
}

fn graph_is_connected(term: &[Delta]) -> bool {
    let mut edges: Vec<(i32, i32)> = Vec::new();
    for d in term {
        if !d.a().is_constant() && !d.b().is_constant() {
            edges.push((d.a().idx(), d.b().idx()));
        }
    }
    let Some(&(start, _)) = edges.first() else {
        return true;
    };
    let mut nbrs: FxHashMap<i32, Vec<i32>> = FxHashMap::default();
    for &(a, b) in &edges {
        nbrs.entry(a).or_default().push(b);
        nbrs.entry(b).or_default().push(a);
    }
    // Reachability marking with an explicit stack; no recursion so the
    // depth never couples to the input size.
    let mut reached = FxHashSet::default();
    let mut stack = vec![start];
    while let Some(v) = stack.pop() {
        if !reached.insert(v) {
            continue;
        }
        if let Some(adjacent) = nbrs.get(&v) {
            stack.extend(adjacent.iter().copied());
        }
    }
    edges
        .iter()
        .all(|&(a, b)| reached.contains(&a) && reached.contains(&b))
}

/// Keeps terms whose variable graph is a single connected component.
/// Edgeless terms trivially pass.
#[must_use]
pub fn terms_with_connected_variable_graph(expr: &DeltaExpr) -> DeltaExpr {
    expr.filtered(|term| graph_is_connected(term))
}

/// Counts the factors of a term touching a given variable.
#[must_use]
pub fn count_var(term: &[Delta], var: i32) -> usize {
    term.iter()
        .filter(|d| {
            (!d.a().is_constant() && d.a().idx() == var)
                || (!d.b().is_constant() && d.b().idx() == var)
        })
        .count()
}

/// Renders the expression grouped by the number of distinct variables per
/// term. A read-only view: grouping never alters algebraic content.
#[must_use]
pub fn format_sorted_by_num_distinct_variables(expr: &DeltaExpr) -> String {
    let mut out = String::new();
    for (num_vars, group) in expr.grouped_by(|term| num_distinct_variables(term)) {
        out.push_str(&format!("{num_vars} vars:\n{group}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use polylog_coalgebra::coproduct::comultiply;

    #[test]
    fn test_alphabet_round_trip() {
        let term = vec![Delta::new(1, 2), Delta::new(3, 0), Delta::new(-4, 5)];
        let key = DeltaExprParam::object_to_key(&term);
        assert_eq!(DeltaExprParam::key_to_object(&key), term);
    }

    #[test]
    fn test_nil_difference_yields_zero() {
        assert!(d(3, 3).is_zero());
        assert!(DeltaExpr::single(vec![Delta::new(1, 2), Delta::new(5, 5)]).is_zero());
    }

    #[test]
    fn test_endpoint_order_is_normalized() {
        assert_eq!(Delta::new(2, 1), Delta::new(1, 2));
        assert_eq!(d(2, 1), d(1, 2));
    }

    #[test]
    fn test_substitution_maps_and_annihilates() {
        let expr = d(1, 2) + d(2, 3);
        let subst = substitute_variables(&expr, &[X::Var(4), X::Var(5), X::Var(6)]);
        assert_eq!(subst, d(4, 5) + d(5, 6));

        // x1 and x2 both map to x7: the (x1 - x2) term collapses.
        let collapsed = substitute_variables(&expr, &[X::Var(7), X::Var(7), X::Var(6)]);
        assert_eq!(collapsed, d(7, 6));
    }

    #[test]
    fn test_substitution_negates_negated_endpoints() {
        let expr = d(1, -2);
        let subst = substitute_variables(&expr, &[X::Var(3), X::Var(4)]);
        assert_eq!(subst, d(3, -4));
    }

    #[test]
    fn test_weak_separation_fixtures() {
        // (1,3) and (2,4) interleave: not weakly separated.
        assert!(!are_weakly_separated(Delta::new(1, 3), Delta::new(2, 4)));
        // (1,2) and (3,4) do not interleave.
        assert!(are_weakly_separated(Delta::new(1, 2), Delta::new(3, 4)));
        // Shared point counts as separated.
        assert!(are_weakly_separated(Delta::new(1, 3), Delta::new(3, 5)));
    }

    #[test]
    fn test_term_weak_separation_and_filter() {
        assert!(!is_weakly_separated(&[Delta::new(1, 3), Delta::new(2, 4)]));
        assert!(is_weakly_separated(&[Delta::new(1, 2), Delta::new(3, 4)]));

        let expr = DeltaExpr::single(vec![Delta::new(1, 3), Delta::new(2, 4)])
            + DeltaExpr::single(vec![Delta::new(1, 2), Delta::new(3, 4)]);
        let kept = keep_non_weakly_separated(&expr);
        assert_eq!(
            kept,
            DeltaExpr::single(vec![Delta::new(1, 3), Delta::new(2, 4)])
        );
        assert!(!is_totally_weakly_separated(&expr));
    }

    #[test]
    fn test_connected_variable_graph() {
        // 1-2, 2-3 is connected; 1-2, 3-4 is not.
        let connected = vec![Delta::new(1, 2), Delta::new(2, 3)];
        let split = vec![Delta::new(1, 2), Delta::new(3, 4)];
        let expr = DeltaExpr::single(connected.clone()) + DeltaExpr::single(split);
        assert_eq!(
            terms_with_connected_variable_graph(&expr),
            DeltaExpr::single(connected)
        );
    }

    #[test]
    fn test_connectivity_ignores_constant_endpoints() {
        // (x1 - 0) contributes no edge; the term is trivially connected.
        let expr = DeltaExpr::single(vec![Delta::new(1, 0)]);
        assert_eq!(terms_with_connected_variable_graph(&expr), expr);
    }

    #[test]
    fn test_normalize_remove_consecutive() {
        let expr = d(1, 2) + d(1, 3);
        assert_eq!(normalize_remove_consecutive(&expr), d(1, 3));
    }

    #[test]
    fn test_multiples_partition() {
        let unique = vec![Delta::new(1, 2), Delta::new(3, 4)];
        let repeated = vec![Delta::new(1, 2), Delta::new(1, 2)];
        let expr = DeltaExpr::single(unique.clone()) + DeltaExpr::single(repeated.clone());
        assert_eq!(terms_with_unique_multiples(&expr), DeltaExpr::single(unique));
        assert_eq!(
            terms_with_nonunique_multiples(&expr),
            DeltaExpr::single(repeated)
        );
    }

    #[test]
    fn test_variable_filters() {
        let expr = DeltaExpr::single(vec![Delta::new(1, 2)])
            + DeltaExpr::single(vec![Delta::new(1, 5)]);
        assert_eq!(
            terms_containing_only_variables(&expr, &[1, 2, 3]),
            DeltaExpr::single(vec![Delta::new(1, 2)])
        );
        assert_eq!(
            terms_without_variables(&expr, &[1, 2]),
            DeltaExpr::single(vec![Delta::new(1, 5)])
        );
    }

    #[test]
    fn test_num_distinct_variables() {
        assert_eq!(num_distinct_variables(&[Delta::new(1, 2), Delta::new(2, 3)]), 3);
        assert_eq!(num_distinct_variables(&[Delta::new(1, 0)]), 1);
        assert_eq!(
            count_var(&[Delta::new(1, 2), Delta::new(2, 3)], 2),
            2
        );
    }

    #[test]
    fn test_comultiply_delta_expr() {
        // The canonical fixture holds for the compressed delta family too.
        let expr = DeltaExpr::single(vec![
            Delta::new(1, 3),
            Delta::new(2, 4),
            Delta::new(1, 2),
            Delta::new(3, 4),
        ]);
        let result = comultiply::<DeltaNCoExprParam>(&expr, &[2, 2]);
        assert!(!result.is_zero());
        assert_eq!(result.weight(), 4);
    }

    #[test]
    fn test_involution_keeps_untouched_terms() {
        let expr = d(1, 2);
        assert_eq!(involute(&expr, &[1, 2, 3, 4, 5, 6]), d(1, 2));
    }

    #[test]
    fn test_involution_expands_last_point_differences() {
        let expr = d(6, 5);
        let expected = d(6, 1) - d(1, 2) + d(2, 3) - d(3, 4) + d(4, 5);
        assert_eq!(involute(&expr, &[1, 2, 3, 4, 5, 6]), expected);
    }

    #[test]
    #[should_panic(expected = "outside the alphabet universe")]
    fn test_alphabet_overflow_is_fatal() {
        let _ = DeltaExprParam::object_to_key(&vec![Delta::new(1, MAX_DELTA_VARIABLES + 1)]);
    }
}
