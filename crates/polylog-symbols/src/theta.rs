//! Mixed difference/complement factors, plus `Lira` formal symbols.
//!
//! A `Theta` factor is either a plain difference `(x_i - x_j)` or a
//! complement `1 - R` where `R` is a compound ratio of differences. A whole
//! term is either a product of such factors or an opaque formal symbol
//! carrying a `Lira` function parameterization. As with epsilon packs,
//! formal symbols refuse product-form operations.

use std::fmt;

use polylog_coalgebra::coexpr::CoExprParam;
use polylog_coalgebra::tensor::TensorParam;
use polylog_linear::linear::{ExprParam, Linear};
use polylog_linear::lyndon::VectorParam;
use polylog_linear::notation;
use polylog_linear::ordering::{LyndonLetter, LyndonOrder};
use polylog_linear::pvector::PVector;

use crate::convert::ConvertError;
use crate::delta::{d, Delta, DeltaExpr, DeltaExprParam};

/// A product of cross ratios, stored as index loops.
///
/// Each loop `[p_1, ..., p_{2k}]` denotes the alternating ratio
/// `(p_1 - p_2)(p_3 - p_4).../(p_2 - p_3)...(p_{2k} - p_1)`; the compound
/// ratio is the product over all loops. The empty product is one.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct CompoundRatio {
    loops: Vec<Vec<i32>>,
}

impl CompoundRatio {
    /// The ratio equal to one (no loops).
    #[must_use]
    pub fn unity() -> Self {
        Self::default()
    }

    /// A single cross ratio over an even number of points.
    ///
    /// # Panics
    ///
    /// Panics unless at least four points are given, evenly many.
    #[must_use]
    pub fn cross_ratio(points: &[i32]) -> Self {
        assert!(points.len() >= 4, "cross ratio needs at least four points");
        assert!(points.len() % 2 == 0, "cross ratio needs evenly many points");
        Self {
            loops: vec![points.to_vec()],
        }
    }

    /// The product of two compound ratios.
    #[must_use]
    pub fn product(&self, other: &Self) -> Self {
        Self {
            loops: self
                .loops
                .iter()
                .chain(other.loops.iter())
                .cloned()
                .collect(),
        }
    }

    /// True for the unity ratio.
    #[must_use]
    pub fn is_unity(&self) -> bool {
        self.loops.is_empty()
    }

    /// The index loops.
    #[must_use]
    pub fn loops(&self) -> &[Vec<i32>] {
        &self.loops
    }
}

impl fmt::Display for CompoundRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unity() {
            return write!(f, "1");
        }
        for points in &self.loops {
            write!(
                f,
                "[{}]",
                notation::join(points.iter().map(ToString::to_string), ",")
            )?;
        }
        Ok(())
    }
}

/// One theta factor.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Theta {
    /// A plain difference of extended points.
    Delta(Delta),
    /// One minus a compound ratio.
    Complement(CompoundRatio),
}

impl Theta {
    /// True for a degenerate factor: a nil difference, or the complement of
    /// the unity ratio (`1 - 1 = 0`).
    #[must_use]
    pub fn is_nil(&self) -> bool {
        match self {
            Theta::Delta(delta) => delta.is_nil(),
            Theta::Complement(ratio) => ratio.is_unity(),
        }
    }
}

impl fmt::Display for Theta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theta::Delta(delta) => write!(f, "{delta}"),
            Theta::Complement(ratio) => write!(f, "(1 - {ratio})"),
        }
    }
}

/// The parameter record of a `Lira` function: foreweight, weight list, and
/// one compound ratio per weight argument.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LiraParam {
    foreweight: i32,
    weights: Vec<i32>,
    ratios: Vec<CompoundRatio>,
}

impl LiraParam {
    /// Creates a parameter record.
    ///
    /// # Panics
    ///
    /// Panics unless every weight is positive, the foreweight is
    /// non-negative, and there is exactly one ratio per weight.
    #[must_use]
    pub fn new(foreweight: i32, weights: Vec<i32>, ratios: Vec<CompoundRatio>) -> Self {
        assert!(foreweight >= 0, "negative foreweight");
        assert!(weights.iter().all(|&w| w >= 1), "weights must be positive");
        assert_eq!(
            weights.len(),
            ratios.len(),
            "one ratio per weight argument"
        );
        Self {
            foreweight,
            weights,
            ratios,
        }
    }

    /// The foreweight.
    #[must_use]
    pub fn foreweight(&self) -> i32 {
        self.foreweight
    }

    /// The weight arguments.
    #[must_use]
    pub fn weights(&self) -> &[i32] {
        &self.weights
    }

    /// The ratio arguments, one per weight.
    #[must_use]
    pub fn ratios(&self) -> &[CompoundRatio] {
        &self.ratios
    }

    /// The number of weight arguments.
    #[must_use]
    pub fn depth(&self) -> i32 {
        i32::try_from(self.weights.len()).expect("depth fits in i32")
    }

    /// Foreweight plus the sum of the weight arguments.
    #[must_use]
    pub fn total_weight(&self) -> i32 {
        self.foreweight + self.weights.iter().sum::<i32>()
    }

    /// The sign the function contributes to its symbol, as for `Li`.
    #[must_use]
    pub fn sign(&self) -> i64 {
        if self.depth() % 2 == 1 {
            1
        } else {
            -1
        }
    }
}

impl fmt::Display for LiraParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lira_{}^{}({})",
            notation::join(self.weights.iter().map(ToString::to_string), "_"),
            self.foreweight,
            notation::join(self.ratios.iter().map(ToString::to_string), ", ")
        )
    }
}

/// A term of a theta expression: a product of factors, or a formal symbol.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ThetaPack {
    /// A tensor product of theta factors. The empty product is unity.
    Product(Vec<Theta>),
    /// An opaque `Lira` parameterization.
    FormalSymbol(LiraParam),
}

/// Compressed key form of one theta factor: differences collapse to their
/// alphabet code, complements keep their ratio.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ThetaKey {
    /// A difference, as a delta alphabet code.
    Delta(u8),
    /// A complement factor.
    Complement(CompoundRatio),
}

impl LyndonLetter for ThetaKey {}

/// Compressed key form of [`ThetaPack`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ThetaPackKey {
    /// Product form.
    Product(PVector<ThetaKey, 8>),
    /// Formal symbol form.
    FormalSymbol(LiraParam),
}

impl LyndonLetter for ThetaPackKey {
    fn length(&self) -> usize {
        match self {
            ThetaPackKey::Product(product) => product.len(),
            ThetaPackKey::FormalSymbol(param) => {
                usize::try_from(param.total_weight()).expect("weight fits in usize")
            }
        }
    }
}

fn theta_to_key(theta: &Theta) -> ThetaKey {
    match theta {
        Theta::Delta(delta) => {
            let key = DeltaExprParam::object_to_key(&vec![*delta]);
            ThetaKey::Delta(key[0])
        }
        Theta::Complement(ratio) => ThetaKey::Complement(ratio.clone()),
    }
}

fn key_to_theta(key: &ThetaKey) -> Theta {
    match key {
        ThetaKey::Delta(code) => {
            let term = DeltaExprParam::key_to_object(&PVector::from_slice(&[*code]));
            Theta::Delta(term[0])
        }
        ThetaKey::Complement(ratio) => Theta::Complement(ratio.clone()),
    }
}

/// Parameterization for theta expressions.
pub struct ThetaExprParam;

/// A linear combination of theta packs.
pub type ThetaExpr = Linear<ThetaExprParam>;

impl ExprParam for ThetaExprParam {
    type Object = ThetaPack;
    type Storage = ThetaPackKey;

    fn object_to_key(obj: &Self::Object) -> Self::Storage {
        match obj {
            ThetaPack::Product(product) => {
                ThetaPackKey::Product(product.iter().map(theta_to_key).collect())
            }
            ThetaPack::FormalSymbol(param) => ThetaPackKey::FormalSymbol(param.clone()),
        }
    }

    fn key_to_object(key: &Self::Storage) -> Self::Object {
        match key {
            ThetaPackKey::Product(product) => {
                ThetaPack::Product(product.iter().map(key_to_theta).collect())
            }
            ThetaPackKey::FormalSymbol(param) => ThetaPack::FormalSymbol(param.clone()),
        }
    }

    fn object_to_string(obj: &Self::Object) -> String {
        match obj {
            ThetaPack::Product(product) if product.is_empty() => notation::UNITY.to_string(),
            ThetaPack::Product(product) => {
                notation::join(product.iter().map(ToString::to_string), notation::TENSOR)
            }
            ThetaPack::FormalSymbol(param) => param.to_string(),
        }
    }

    fn object_to_weight(obj: &Self::Object) -> i32 {
        match obj {
            ThetaPack::Product(product) => {
                i32::try_from(product.len()).expect("term weight fits in i32")
            }
            ThetaPack::FormalSymbol(param) => param.total_weight(),
        }
    }

    fn object_is_nil(obj: &Self::Object) -> bool {
        match obj {
            ThetaPack::Product(product) => product.iter().any(Theta::is_nil),
            ThetaPack::FormalSymbol(_) => false,
        }
    }
}

impl VectorParam for ThetaExprParam {
    type Letter = ThetaKey;

    fn key_to_letters(key: &Self::Storage) -> Vec<ThetaKey> {
        match key {
            ThetaPackKey::Product(product) => product.to_vec(),
            ThetaPackKey::FormalSymbol(_) => {
                panic!("vector form is not defined for formal symbols")
            }
        }
    }

    fn letters_to_key(letters: &[ThetaKey]) -> Self::Storage {
        ThetaPackKey::Product(PVector::from_slice(letters))
    }
}

impl TensorParam for ThetaExprParam {
    fn monom_tensor_product(lhs: &Self::Storage, rhs: &Self::Storage) -> Self::Storage {
        match (lhs, rhs) {
            (ThetaPackKey::Product(l), ThetaPackKey::Product(r)) => {
                ThetaPackKey::Product(l.concat(r))
            }
            _ => panic!("tensor product is not defined for formal symbols"),
        }
    }
}

/// Iterated co-expression parameterization for theta packs (non-Lie).
pub struct ThetaICoExprParam;

/// An iterated co-expression over theta packs.
pub type ThetaICoExpr = Linear<ThetaICoExprParam>;

impl ExprParam for ThetaICoExprParam {
    type Object = Vec<ThetaPack>;
    type Storage = PVector<ThetaPackKey, 4>;

    fn object_to_key(obj: &Self::Object) -> Self::Storage {
        obj.iter().map(ThetaExprParam::object_to_key).collect()
    }

    fn key_to_object(key: &Self::Storage) -> Self::Object {
        key.iter().map(ThetaExprParam::key_to_object).collect()
    }

    fn object_to_string(obj: &Self::Object) -> String {
        notation::join(
            obj.iter().map(ThetaExprParam::object_to_string),
            notation::COPROD_HOPF,
        )
    }

    fn object_to_weight(obj: &Self::Object) -> i32 {
        obj.iter().map(ThetaExprParam::object_to_weight).sum()
    }

    fn object_is_nil(obj: &Self::Object) -> bool {
        obj.iter().any(ThetaExprParam::object_is_nil)
    }
}

impl VectorParam for ThetaICoExprParam {
    type Letter = ThetaPackKey;

    const LYNDON_ORDER: LyndonOrder = LyndonOrder::LengthFirst;

    fn key_to_letters(key: &Self::Storage) -> Vec<ThetaPackKey> {
        key.to_vec()
    }

    fn letters_to_key(letters: &[ThetaPackKey]) -> Self::Storage {
        PVector::from_slice(letters)
    }
}

impl CoExprParam for ThetaICoExprParam {
    type PartParam = ThetaExprParam;

    const IS_LIE_ALGEBRA: bool = false;
    const IS_ITERATED: bool = true;
}

/// The unity term (empty product).
#[must_use]
pub fn t_unity() -> ThetaExpr {
    ThetaExpr::single(ThetaPack::Product(vec![]))
}

/// The symbol of a compound ratio: the alternating sum of differences
/// around each loop.
#[must_use]
pub fn t_ratio(ratio: &CompoundRatio) -> ThetaExpr {
    let mut delta_part = DeltaExpr::new();
    for points in ratio.loops() {
        for (i, &p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            let term = d(p, q);
            if i % 2 == 0 {
                delta_part += term;
            } else {
                delta_part -= term;
            }
        }
    }
    delta_expr_to_theta_expr(&delta_part)
}

/// A complement factor term `1 - R`.
#[must_use]
pub fn t_complement(ratio: CompoundRatio) -> ThetaExpr {
    ThetaExpr::single(ThetaPack::Product(vec![Theta::Complement(ratio)]))
}

/// A formal symbol term.
#[must_use]
pub fn t_formal_symbol(param: LiraParam) -> ThetaExpr {
    ThetaExpr::single(ThetaPack::FormalSymbol(param))
}

/// Lifts a delta expression to theta: every term becomes a product of
/// plain difference factors.
#[must_use]
pub fn delta_expr_to_theta_expr(expr: &DeltaExpr) -> ThetaExpr {
    expr.mapped(|term: &Vec<Delta>| {
        ThetaPack::Product(term.iter().map(|&delta| Theta::Delta(delta)).collect())
    })
}

/// Projects a theta expression back to deltas. Every term must be a
/// product of plain differences.
///
/// # Errors
///
/// Fails on complement factors and formal symbols.
pub fn theta_expr_to_delta_expr(expr: &ThetaExpr) -> Result<DeltaExpr, ConvertError> {
    let mut ret = DeltaExpr::new();
    let mut failure = None;
    expr.foreach(|pack, coeff| {
        if failure.is_some() {
            return;
        }
        match pack {
            ThetaPack::Product(product) => {
                let mut term = Vec::with_capacity(product.len());
                for theta in product {
                    match theta {
                        Theta::Delta(delta) => term.push(delta),
                        Theta::Complement(_) => {
                            failure = Some(ConvertError::ComplementFactor);
                            return;
                        }
                    }
                }
                ret.add_to(&term, coeff);
            }
            ThetaPack::FormalSymbol(_) => {
                failure = Some(ConvertError::FormalSymbol);
            }
        }
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(ret.copy_annotations_from(expr)),
    }
}
