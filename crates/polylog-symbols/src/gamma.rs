//! Grassmannian minors (Plücker coordinates).
//!
//! A `Gamma` is a minor of a `[d x n]` matrix, identified by the set of
//! columns it includes. It generalizes `Delta` for terms built purely from
//! plain variables: a dimension-2 minor `{i, j}` corresponds to the
//! difference `(x_i - x_j)`.

use std::fmt;

use polylog_coalgebra::coexpr::CoExprParam;
use polylog_coalgebra::tensor::TensorParam;
use polylog_linear::linear::{ExprParam, Linear};
use polylog_linear::lyndon::VectorParam;
use polylog_linear::notation;
use polylog_linear::ordering::{LyndonLetter, LyndonOrder};
use polylog_linear::pvector::PVector;

use crate::convert::ConvertError;
use crate::delta::{Delta, DeltaExpr};
use crate::x::X;

/// The bounded column universe. Index sets are stored as 16-bit bitsets.
pub const MAX_GAMMA_VARIABLES: i32 = 16;

/// A minor, identified by the bitset of its column indices (1-based).
///
/// The empty set is nil; construction from out-of-universe or repeated
/// indices also yields nil (a minor with a repeated column vanishes).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Gamma {
    indices: u16,
}

impl Gamma {
    /// Creates a minor from its column indices.
    #[must_use]
    pub fn new(vars: &[i32]) -> Self {
        let mut indices: u16 = 0;
        for &v in vars {
            if !(1..=MAX_GAMMA_VARIABLES).contains(&v) {
                return Self { indices: 0 };
            }
            let bit = 1u16 << (v - 1);
            if indices & bit != 0 {
                return Self { indices: 0 };
            }
            indices |= bit;
        }
        Self { indices }
    }

    /// True for the empty index set.
    #[must_use]
    pub fn is_nil(self) -> bool {
        self.indices == 0
    }

    /// The raw index bitset.
    #[must_use]
    pub fn index_bitset(self) -> u16 {
        self.indices
    }

    /// The column indices in increasing order.
    #[must_use]
    pub fn index_vector(self) -> Vec<i32> {
        (1..=MAX_GAMMA_VARIABLES)
            .filter(|&v| self.indices & (1 << (v - 1)) != 0)
            .collect()
    }

    /// The minor size (number of columns).
    #[must_use]
    pub fn dimension(self) -> i32 {
        i32::from(self.indices.count_ones() as u16)
    }
}

impl fmt::Display for Gamma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({})",
            notation::join(self.index_vector().iter().map(ToString::to_string), ",")
        )
    }
}

impl LyndonLetter for Gamma {}

/// Parameterization for plain minor expressions.
pub struct GammaExprParam;

/// A linear combination of minor terms.
pub type GammaExpr = Linear<GammaExprParam>;

impl ExprParam for GammaExprParam {
    type Object = Vec<Gamma>;
    type Storage = PVector<Gamma, 10>;

    fn object_to_key(obj: &Self::Object) -> Self::Storage {
        PVector::from_slice(obj)
    }

    fn key_to_object(key: &Self::Storage) -> Self::Object {
        key.to_vec()
    }

    fn object_to_string(obj: &Self::Object) -> String {
        notation::join(obj.iter().map(ToString::to_string), notation::TENSOR)
    }

    fn object_to_weight(obj: &Self::Object) -> i32 {
        i32::try_from(obj.len()).expect("term weight fits in i32")
    }

    fn object_to_dimension(obj: &Self::Object) -> i32 {
        assert!(!obj.is_empty(), "dimension of an empty term");
        let first = obj[0].dimension();
        assert!(
            obj.iter().all(|g| g.dimension() == first),
            "mixed minor dimensions within one term"
        );
        first
    }

    fn object_is_nil(obj: &Self::Object) -> bool {
        obj.iter().any(|g| g.is_nil())
    }
}

impl VectorParam for GammaExprParam {
    type Letter = Gamma;

    fn key_to_letters(key: &Self::Storage) -> Vec<Gamma> {
        key.to_vec()
    }

    fn letters_to_key(letters: &[Gamma]) -> Self::Storage {
        PVector::from_slice(letters)
    }
}

impl TensorParam for GammaExprParam {
    fn monom_tensor_product(lhs: &Self::Storage, rhs: &Self::Storage) -> Self::Storage {
        if let (Some(l), Some(r)) = (lhs.first(), rhs.first()) {
            assert!(
                l.dimension() == r.dimension(),
                "tensor product of minor terms with mixed dimensions: {} vs {}",
                l.dimension(),
                r.dimension()
            );
        }
        lhs.concat(rhs)
    }
}

/// Iterated co-expression parameterization for minor terms.
pub struct GammaICoExprParam;

/// An iterated co-expression over minor terms.
pub type GammaICoExpr = Linear<GammaICoExprParam>;

/// Normal (iteration-insensitive) co-expression parameterization.
pub struct GammaNCoExprParam;

/// A normal co-expression over minor terms.
pub type GammaNCoExpr = Linear<GammaNCoExprParam>;

/// Co-expression parameterization carrying the Lie-algebra comparator
/// (descending part length first). Used by antisymmetrization checks and by
/// [`expand_into_glued_pairs`].
pub struct GammaACoExprParam;

/// A co-expression over minor terms under the Lie-algebra comparator.
pub type GammaACoExpr = Linear<GammaACoExprParam>;

macro_rules! gamma_co_expr_param {
    ($param:ident, $separator:expr, $order:expr, $is_iterated:expr) => {
        impl ExprParam for $param {
            type Object = Vec<Vec<Gamma>>;
            type Storage = PVector<PVector<Gamma, 10>, 8>;

            fn object_to_key(obj: &Self::Object) -> Self::Storage {
                obj.iter().map(|part| GammaExprParam::object_to_key(part)).collect()
            }

            fn key_to_object(key: &Self::Storage) -> Self::Object {
                key.iter().map(GammaExprParam::key_to_object).collect()
            }

            fn object_to_string(obj: &Self::Object) -> String {
                notation::join(obj.iter().map(GammaExprParam::object_to_string), $separator)
            }

            fn object_to_weight(obj: &Self::Object) -> i32 {
                obj.iter().map(GammaExprParam::object_to_weight).sum()
            }

            fn object_to_dimension(obj: &Self::Object) -> i32 {
                assert!(!obj.is_empty(), "dimension of an empty co-term");
                let dims: Vec<i32> =
                    obj.iter().map(GammaExprParam::object_to_dimension).collect();
                assert!(
                    dims.iter().all(|&d| d == dims[0]),
                    "mixed minor dimensions across co-expression parts"
                );
                dims[0]
            }

            fn object_is_nil(obj: &Self::Object) -> bool {
                obj.iter().any(|part| GammaExprParam::object_is_nil(part))
            }
        }

        impl VectorParam for $param {
            type Letter = PVector<Gamma, 10>;

            const LYNDON_ORDER: LyndonOrder = $order;

            fn key_to_letters(key: &Self::Storage) -> Vec<Self::Letter> {
                key.to_vec()
            }

            fn letters_to_key(letters: &[Self::Letter]) -> Self::Storage {
                PVector::from_slice(letters)
            }
        }

        impl CoExprParam for $param {
            type PartParam = GammaExprParam;

            const IS_LIE_ALGEBRA: bool = true;
            const IS_ITERATED: bool = $is_iterated;
        }
    };
}

gamma_co_expr_param!(
    GammaICoExprParam,
    notation::COPROD_ITERATED,
    LyndonOrder::LengthFirst,
    true
);
gamma_co_expr_param!(
    GammaNCoExprParam,
    notation::COPROD_NORMAL,
    LyndonOrder::LengthFirst,
    false
);
gamma_co_expr_param!(
    GammaACoExprParam,
    notation::COPROD_ITERATED,
    LyndonOrder::DescLengthFirst,
    true
);

/// Builds a single-minor expression. A nil minor yields zero.
#[must_use]
pub fn g(vars: &[i32]) -> GammaExpr {
    GammaExpr::single(vec![Gamma::new(vars)])
}

/// Replaces column `i` with `new_points[i - 1]` in every minor.
/// A substitution collapsing two columns of one minor annihilates the term.
///
/// # Panics
///
/// Panics when a column index exceeds the substitution table.
#[must_use]
pub fn substitute_variables(expr: &GammaExpr, new_points: &[i32]) -> GammaExpr {
    expr.mapped_expanding(|term: &Vec<Gamma>| {
        let mut term_new = Vec::with_capacity(term.len());
        for g_old in term {
            let vars: Vec<i32> = g_old
                .index_vector()
                .iter()
                .map(|&v| {
                    let i = usize::try_from(v - 1).expect("column index is positive");
                    match new_points.get(i) {
                        Some(&p) => p,
                        None => panic!("substitution index {v} out of range"),
                    }
                })
                .collect();
            let g_new = Gamma::new(&vars);
            if g_new.is_nil() {
                return GammaExpr::new();
            }
            term_new.push(g_new);
        }
        GammaExpr::single(term_new)
    })
    .without_annotations()
}

/// Whether two minors are weakly separated: the sets `A \ B` and `B \ A`
/// must not interleave on the cyclic order of column indices.
#[must_use]
pub fn are_weakly_separated(g1: Gamma, g2: Gamma) -> bool {
    let only1 = g1.index_bitset() & !g2.index_bitset();
    let only2 = g2.index_bitset() & !g1.index_bitset();
    if only1 == 0 || only2 == 0 {
        return true;
    }
    // Walk the symmetric difference in index order and count the blocks of
    // equal origin; more than two blocks on the circle means interleaving.
    let mut labels: Vec<bool> = Vec::new();
    for v in 0..MAX_GAMMA_VARIABLES {
        let bit = 1u16 << v;
        if only1 & bit != 0 {
            labels.push(true);
        } else if only2 & bit != 0 {
            labels.push(false);
        }
    }
    let transitions = (0..labels.len())
        .filter(|&i| labels[i] != labels[(i + 1) % labels.len()])
        .count();
    transitions <= 2
}

/// Whether every pair of minors in a term is weakly separated.
#[must_use]
pub fn is_weakly_separated(term: &[Gamma]) -> bool {
    for i in 0..term.len() {
        for j in 0..i {
            if !are_weakly_separated(term[i], term[j]) {
                return false;
            }
        }
    }
    true
}

/// Co-expression variant: flattens the parts and checks all minor pairs.
#[must_use]
pub fn is_weakly_separated_co(term: &[Vec<Gamma>]) -> bool {
    let flat: Vec<Gamma> = term.iter().flatten().copied().collect();
    is_weakly_separated(&flat)
}

/// Whether every term of the expression is weakly separated.
#[must_use]
pub fn is_totally_weakly_separated(expr: &GammaExpr) -> bool {
    !expr.contains(|term| !is_weakly_separated(term))
}

/// Keeps only the terms that are not weakly separated.
#[must_use]
pub fn keep_non_weakly_separated(expr: &GammaExpr) -> GammaExpr {
    expr.filtered(|term| !is_weakly_separated(term))
}

fn is_cyclic_window(g: Gamma, dimension: i32, num_points: i32) -> bool {
    let d = g.dimension();
    if d != dimension {
        return false;
    }
    (1..=num_points).any(|start| {
        let mut window: u16 = 0;
        for j in 0..d {
            let v = (start - 1 + j) % num_points + 1;
            window |= 1 << (v - 1);
        }
        window == g.index_bitset()
    })
}

/// Whether no minor of the term is a cyclically consecutive column window
/// of the given size over `1..=num_points` (wrap-around included).
#[must_use]
pub fn passes_normalize_remove_consecutive(
    term: &[Gamma],
    dimension: i32,
    num_points: i32,
) -> bool {
    term.iter()
        .all(|&g| !is_cyclic_window(g, dimension, num_points))
}

/// Drops terms containing a cyclically consecutive column window.
#[must_use]
pub fn normalize_remove_consecutive(
    expr: &GammaExpr,
    dimension: i32,
    num_points: i32,
) -> GammaExpr {
    expr.filtered(|term| passes_normalize_remove_consecutive(term, dimension, num_points))
}

/// Variant inferring the dimension and point count from the expression
/// itself (the largest column index present).
#[must_use]
pub fn normalize_remove_consecutive_auto(expr: &GammaExpr) -> GammaExpr {
    if expr.is_zero() {
        return expr.clone();
    }
    let dimension = expr.dimension();
    let mut num_points = 0;
    expr.foreach(|term, _| {
        for g in &term {
            if let Some(&max) = g.index_vector().last() {
                num_points = num_points.max(max);
            }
        }
    });
    normalize_remove_consecutive(expr, dimension, num_points)
}

/// Converts a delta expression to minors. Every difference must be between
/// two plain variables; anything else is a [`ConvertError`].
///
/// # Errors
///
/// Fails on terms containing constants, negated variables, or other
/// non-simple endpoints.
pub fn delta_expr_to_gamma_expr(expr: &DeltaExpr) -> Result<GammaExpr, ConvertError> {
    let mut ret = GammaExpr::new();
    let mut failure = None;
    expr.foreach(|term, coeff| {
        if failure.is_some() {
            return;
        }
        let mut term_new = Vec::with_capacity(term.len());
        for d in &term {
            match (d.a(), d.b()) {
                (X::Var(i), X::Var(j)) => term_new.push(Gamma::new(&[i, j])),
                _ => {
                    failure = Some(ConvertError::NonSimpleGenerator(d.to_string()));
                    return;
                }
            }
        }
        ret.add_to(&term_new, coeff);
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(ret.copy_annotations_from(expr)),
    }
}

/// Converts a dimension-2 minor expression back to differences.
///
/// # Errors
///
/// Fails when any minor has a dimension other than 2.
pub fn gamma_expr_to_delta_expr(expr: &GammaExpr) -> Result<DeltaExpr, ConvertError> {
    let mut ret = DeltaExpr::new();
    let mut failure = None;
    expr.foreach(|term, coeff| {
        if failure.is_some() {
            return;
        }
        let mut term_new = Vec::with_capacity(term.len());
        for g in &term {
            match g.index_vector().as_slice() {
                &[i, j] => term_new.push(Delta::new(i, j)),
                other => {
                    failure = Some(ConvertError::WrongDimension {
                        expected: 2,
                        found: i32::try_from(other.len()).expect("dimension fits in i32"),
                    });
                    return;
                }
            }
        }
        ret.add_to(&term_new, coeff);
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(ret.copy_annotations_from(expr)),
    }
}

/// Converts each term `x1 ⊗ x2 ⊗ ... ⊗ xn` into the sum over `i` of
/// co-terms whose parts are single factors except one glued pair
/// `(xi, x{i+1})`:
///
/// ```text
///   + (x1 x2) ⊗ x3 ⊗ ... ⊗ xn
///   + x1 ⊗ (x2 x3) ⊗ ... ⊗ xn
///   + ...
/// ```
#[must_use]
pub fn expand_into_glued_pairs(expr: &GammaExpr) -> GammaACoExpr {
    let mut ret = GammaACoExpr::new();
    expr.foreach(|term, coeff| {
        for glued in 0..term.len().saturating_sub(1) {
            let mut parts: Vec<Vec<Gamma>> = Vec::with_capacity(term.len() - 1);
            let mut i = 0;
            while i < term.len() {
                if i == glued {
                    parts.push(vec![term[i], term[i + 1]]);
                    i += 2;
                } else {
                    parts.push(vec![term[i]]);
                    i += 1;
                }
            }
            ret.add_to(&parts, coeff);
        }
    });
    ret.copy_annotations_from(expr)
}
