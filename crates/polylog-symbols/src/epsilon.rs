//! Variable products and their complements, plus `Li` formal symbols.
//!
//! An `Epsilon` factor is either a product of variables `x_{i_1}...x_{i_k}`
//! or a complement `1 - x_{i_1}...x_{i_k}`, both stored as index bitsets.
//! A whole term is either a product of such factors or an opaque formal
//! symbol carrying a `Li` function parameterization; formal symbols refuse
//! product-form operations.

use std::fmt;

use polylog_coalgebra::coexpr::CoExprParam;
use polylog_coalgebra::tensor::TensorParam;
use polylog_linear::linear::{ExprParam, Linear};
use polylog_linear::lyndon::VectorParam;
use polylog_linear::notation;
use polylog_linear::ordering::{LyndonLetter, LyndonOrder};
use polylog_linear::pvector::PVector;

/// The bounded variable universe for epsilon bitsets.
pub const MAX_EPSILON_VARIABLES: i32 = 16;

fn vars_to_bitset(vars: &[i32]) -> u16 {
    let mut bits: u16 = 0;
    for &v in vars {
        assert!(
            (1..=MAX_EPSILON_VARIABLES).contains(&v),
            "epsilon variable index out of universe: {v}"
        );
        bits |= 1 << (v - 1);
    }
    bits
}

fn bitset_to_vars(bits: u16) -> Vec<i32> {
    (1..=MAX_EPSILON_VARIABLES)
        .filter(|&v| bits & (1 << (v - 1)) != 0)
        .collect()
}

/// One epsilon factor.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Epsilon {
    /// A product of variables, stored as an index bitset.
    Variable(u16),
    /// One minus a product of variables.
    Complement(u16),
}

impl Epsilon {
    /// True for an empty index set; nil factors annihilate their term.
    #[must_use]
    pub fn is_nil(self) -> bool {
        match self {
            Epsilon::Variable(bits) | Epsilon::Complement(bits) => bits == 0,
        }
    }
}

impl fmt::Display for Epsilon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let product = |bits: u16| {
            notation::join(bitset_to_vars(bits).iter().map(|v| format!("x{v}")), "*")
        };
        match self {
            Epsilon::Variable(bits) => write!(f, "{}", product(*bits)),
            Epsilon::Complement(bits) => write!(f, "(1 - {})", product(*bits)),
        }
    }
}

impl LyndonLetter for Epsilon {}

/// The parameter record of a `Li` function: foreweight, weight list, and
/// one point group per weight argument.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LiParam {
    foreweight: i32,
    weights: Vec<i32>,
    points: Vec<Vec<i32>>,
}

impl LiParam {
    /// Creates a parameter record.
    ///
    /// # Panics
    ///
    /// Panics unless every weight is positive, the foreweight is
    /// non-negative, and there is exactly one point group per weight.
    #[must_use]
    pub fn new(foreweight: i32, weights: Vec<i32>, points: Vec<Vec<i32>>) -> Self {
        assert!(foreweight >= 0, "negative foreweight");
        assert!(weights.iter().all(|&w| w >= 1), "weights must be positive");
        assert_eq!(
            weights.len(),
            points.len(),
            "one point group per weight argument"
        );
        Self {
            foreweight,
            weights,
            points,
        }
    }

    /// The foreweight (leading zeros of the defining integral).
    #[must_use]
    pub fn foreweight(&self) -> i32 {
        self.foreweight
    }

    /// The weight arguments.
    #[must_use]
    pub fn weights(&self) -> &[i32] {
        &self.weights
    }

    /// The point groups, one per weight argument.
    #[must_use]
    pub fn points(&self) -> &[Vec<i32>] {
        &self.points
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

    /// The sign the function contributes to its symbol: `+1` for odd
    /// depth, `-1` for even depth.
    #[must_use]
    pub fn sign(&self) -> i64 {
        if self.depth() % 2 == 1 {
            1
        } else {
            -1
        }
    }
}

impl fmt::Display for LiParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = notation::join(
            self.points.iter().map(|group| {
                notation::join(group.iter().map(ToString::to_string), ",")
            }),
            ")(",
        );
        write!(
            f,
            "Li_{}^{}({})",
            notation::join(self.weights.iter().map(ToString::to_string), "_"),
            self.foreweight,
            groups
        )
    }
}

/// A term of an epsilon expression: a product of factors, or a formal
/// symbol when the expression cannot be decomposed further.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EpsilonPack {
    /// A tensor product of epsilon factors. The empty product is unity.
    Product(Vec<Epsilon>),
    /// An opaque `Li` parameterization.
    FormalSymbol(LiParam),
}

/// Compressed key form of [`EpsilonPack`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum EpsilonPackKey {
    /// Product form.
    Product(PVector<Epsilon, 8>),
    /// Formal symbol form.
    FormalSymbol(LiParam),
}

impl LyndonLetter for EpsilonPackKey {
    fn length(&self) -> usize {
        match self {
            EpsilonPackKey::Product(product) => product.len(),
            EpsilonPackKey::FormalSymbol(param) => {
                usize::try_from(param.total_weight()).expect("weight fits in usize")
            }
        }
    }
}

/// Parameterization for epsilon expressions.
pub struct EpsilonExprParam;

/// A linear combination of epsilon packs.
pub type EpsilonExpr = Linear<EpsilonExprParam>;

impl ExprParam for EpsilonExprParam {
    type Object = EpsilonPack;
    type Storage = EpsilonPackKey;

    fn object_to_key(obj: &Self::Object) -> Self::Storage {
        match obj {
            EpsilonPack::Product(product) => {
                EpsilonPackKey::Product(PVector::from_slice(product))
            }
            EpsilonPack::FormalSymbol(param) => EpsilonPackKey::FormalSymbol(param.clone()),
        }
    }

    fn key_to_object(key: &Self::Storage) -> Self::Object {
        match key {
            EpsilonPackKey::Product(product) => EpsilonPack::Product(product.to_vec()),
            EpsilonPackKey::FormalSymbol(param) => EpsilonPack::FormalSymbol(param.clone()),
        }
    }

    fn object_to_string(obj: &Self::Object) -> String {
        match obj {
            EpsilonPack::Product(product) if product.is_empty() => notation::UNITY.to_string(),
            EpsilonPack::Product(product) => {
                notation::join(product.iter().map(ToString::to_string), notation::TENSOR)
            }
            EpsilonPack::FormalSymbol(param) => param.to_string(),
        }
    }

    fn object_to_weight(obj: &Self::Object) -> i32 {
        match obj {
            EpsilonPack::Product(product) => {
                i32::try_from(product.len()).expect("term weight fits in i32")
            }
            EpsilonPack::FormalSymbol(param) => param.total_weight(),
        }
    }

    fn object_is_nil(obj: &Self::Object) -> bool {
        match obj {
            EpsilonPack::Product(product) => product.iter().any(|e| e.is_nil()),
            EpsilonPack::FormalSymbol(_) => false,
        }
    }
}

impl VectorParam for EpsilonExprParam {
    type Letter = Epsilon;

    fn key_to_letters(key: &Self::Storage) -> Vec<Epsilon> {
        match key {
            EpsilonPackKey::Product(product) => product.to_vec(),
            EpsilonPackKey::FormalSymbol(_) => {
                panic!("vector form is not defined for formal symbols")
            }
        }
    }

    fn letters_to_key(letters: &[Epsilon]) -> Self::Storage {
        EpsilonPackKey::Product(PVector::from_slice(letters))
    }
}

impl TensorParam for EpsilonExprParam {
    fn monom_tensor_product(lhs: &Self::Storage, rhs: &Self::Storage) -> Self::Storage {
        match (lhs, rhs) {
            (EpsilonPackKey::Product(l), EpsilonPackKey::Product(r)) => {
                EpsilonPackKey::Product(l.concat(r))
            }
            _ => panic!("tensor product is not defined for formal symbols"),
        }
    }
}

/// Iterated co-expression parameterization for epsilon packs.
///
/// Not a Lie-algebra shape: the Hopf-style coproduct keeps the unity-part
/// terms an antisymmetric normalization would cancel.
pub struct EpsilonICoExprParam;

/// An iterated co-expression over epsilon packs.
pub type EpsilonICoExpr = Linear<EpsilonICoExprParam>;

impl ExprParam for EpsilonICoExprParam {
    type Object = Vec<EpsilonPack>;
    type Storage = PVector<EpsilonPackKey, 4>;

    fn object_to_key(obj: &Self::Object) -> Self::Storage {
        obj.iter().map(EpsilonExprParam::object_to_key).collect()
    }

    fn key_to_object(key: &Self::Storage) -> Self::Object {
        key.iter().map(EpsilonExprParam::key_to_object).collect()
    }

    fn object_to_string(obj: &Self::Object) -> String {
        notation::join(
            obj.iter().map(EpsilonExprParam::object_to_string),
            notation::COPROD_HOPF,
        )
    }

    fn object_to_weight(obj: &Self::Object) -> i32 {
        obj.iter().map(EpsilonExprParam::object_to_weight).sum()
    }

    fn object_is_nil(obj: &Self::Object) -> bool {
        obj.iter().any(EpsilonExprParam::object_is_nil)
    }
}

impl VectorParam for EpsilonICoExprParam {
    type Letter = EpsilonPackKey;

    const LYNDON_ORDER: LyndonOrder = LyndonOrder::LengthFirst;

    fn key_to_letters(key: &Self::Storage) -> Vec<EpsilonPackKey> {
        key.to_vec()
    }

    fn letters_to_key(letters: &[EpsilonPackKey]) -> Self::Storage {
        PVector::from_slice(letters)
    }
}

impl CoExprParam for EpsilonICoExprParam {
    type PartParam = EpsilonExprParam;

    const IS_LIE_ALGEBRA: bool = false;
    const IS_ITERATED: bool = true;
}

/// The unity term (empty product).
#[must_use]
pub fn e_unity() -> EpsilonExpr {
    EpsilonExpr::single(EpsilonPack::Product(vec![]))
}

/// A single-variable factor `x_i`.
#[must_use]
pub fn e_var(i: i32) -> EpsilonExpr {
    EpsilonExpr::single(EpsilonPack::Product(vec![Epsilon::Variable(
        vars_to_bitset(&[i]),
    )]))
}

/// The symbol of the product `x_from * ... * x_to`: the sum of the
/// individual variable factors.
#[must_use]
pub fn e_var_prod(from: i32, to: i32) -> EpsilonExpr {
    let mut ret = EpsilonExpr::new();
    for i in from..=to {
        ret += e_var(i);
    }
    ret
}

/// The complement factor `1 - x_{i_1}...x_{i_k}` over an explicit index
/// list.
#[must_use]
pub fn e_complement_index_list(indices: &[i32]) -> EpsilonExpr {
    EpsilonExpr::single(EpsilonPack::Product(vec![Epsilon::Complement(
        vars_to_bitset(indices),
    )]))
}

/// The complement factor `1 - x_from * ... * x_to`.
#[must_use]
pub fn e_complement_range_incl(from: i32, to: i32) -> EpsilonExpr {
    let indices: Vec<i32> = (from..=to).collect();
    e_complement_index_list(&indices)
}

/// A formal symbol term.
#[must_use]
pub fn e_formal_symbol(param: LiParam) -> EpsilonExpr {
    EpsilonExpr::single(EpsilonPack::FormalSymbol(param))
}

/// A formal symbol term scaled by the sign of its parameterization.
#[must_use]
pub fn e_formal_symbol_signed(param: LiParam) -> EpsilonExpr {
    let sign = param.sign();
    e_formal_symbol(param) * sign
}

fn map_bitset(bits: u16, groups: &[Vec<i32>]) -> u16 {
    let mut ret: u16 = 0;
    for v in bitset_to_vars(bits) {
        let i = usize::try_from(v - 1).expect("variable index is positive");
        match groups.get(i) {
            Some(group) => ret |= vars_to_bitset(group),
            None => panic!("substitution index {v} out of range"),
        }
    }
    ret
}

/// Replaces variable `x_i` with the product of `groups[i - 1]` in every
/// factor; formal symbols substitute inside their point groups. An empty
/// replacement group makes the factor nil and annihilates the term.
#[must_use]
pub fn substitute_variables(expr: &EpsilonExpr, groups: &[Vec<i32>]) -> EpsilonExpr {
    expr.mapped_expanding(|pack: &EpsilonPack| {
        let pack_new = match pack {
            EpsilonPack::Product(product) => EpsilonPack::Product(
                product
                    .iter()
                    .map(|&e| match e {
                        Epsilon::Variable(bits) => Epsilon::Variable(map_bitset(bits, groups)),
                        Epsilon::Complement(bits) => {
                            Epsilon::Complement(map_bitset(bits, groups))
                        }
                    })
                    .collect(),
            ),
            EpsilonPack::FormalSymbol(param) => {
                let points_new: Vec<Vec<i32>> = param
                    .points()
                    .iter()
                    .map(|group| bitset_to_vars(map_bitset(vars_to_bitset(group), groups)))
                    .collect();
                EpsilonPack::FormalSymbol(LiParam::new(
                    param.foreweight(),
                    param.weights().to_vec(),
                    points_new,
                ))
            }
        };
        EpsilonExpr::single(pack_new)
    })
    .without_annotations()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polylog_coalgebra::coproduct::coproduct;
    use polylog_coalgebra::tensor::tensor_product;

    #[test]
    fn test_var_prod_is_sum_of_logs() {
        assert_eq!(e_var_prod(1, 3), e_var(1) + e_var(2) + e_var(3));
    }

    #[test]
    fn test_complement_range() {
        assert_eq!(
            e_complement_range_incl(2, 4),
            e_complement_index_list(&[2, 3, 4])
        );
    }

    #[test]
    fn test_tensor_product_concatenates_products() {
        let prod = tensor_product(&e_var(1), &e_complement_range_incl(1, 2));
        assert_eq!(
            prod,
            EpsilonExpr::single(EpsilonPack::Product(vec![
                Epsilon::Variable(0b01),
                Epsilon::Complement(0b11),
            ]))
        );
    }

    #[test]
    #[should_panic(expected = "not defined for formal symbols")]
    fn test_tensor_product_rejects_formal_symbols() {
        let symbol = e_formal_symbol(LiParam::new(0, vec![2], vec![vec![1]]));
        let _ = tensor_product(&symbol, &e_var(1));
    }

    #[test]
    fn test_formal_symbol_sign() {
        let li_depth_1 = LiParam::new(0, vec![2], vec![vec![1]]);
        let li_depth_2 = LiParam::new(0, vec![1, 1], vec![vec![1], vec![2]]);
        assert_eq!(li_depth_1.sign(), 1);
        assert_eq!(li_depth_2.sign(), -1);
        assert_eq!(
            e_formal_symbol_signed(li_depth_2.clone()),
            -e_formal_symbol(li_depth_2)
        );
    }

    #[test]
    fn test_total_weight() {
        let param = LiParam::new(2, vec![1, 3], vec![vec![1], vec![2, 3]]);
        assert_eq!(param.total_weight(), 6);
        assert_eq!(e_formal_symbol(param).weight(), 6);
    }

    #[test]
    fn test_substitution_unions_groups() {
        let expr = e_complement_index_list(&[1, 2]);
        let subst = substitute_variables(&expr, &[vec![3, 4], vec![5]]);
        assert_eq!(subst, e_complement_index_list(&[3, 4, 5]));
    }

    #[test]
    fn test_substitution_inside_formal_symbols() {
        let symbol = e_formal_symbol(LiParam::new(0, vec![1], vec![vec![1, 2]]));
        let subst = substitute_variables(&symbol, &[vec![3], vec![4, 5]]);
        assert_eq!(
            subst,
            e_formal_symbol(LiParam::new(0, vec![1], vec![vec![3, 4, 5]]))
        );
    }

    #[test]
    fn test_unity_coproduct_pairs_survive() {
        // Non-Lie shape: unity parts are kept, not antisymmetrized away.
        let result = coproduct::<EpsilonICoExprParam>(&e_unity(), &e_var(1))
            + coproduct::<EpsilonICoExprParam>(&e_var(1), &e_unity());
        assert_eq!(result.num_terms(), 2);
    }

    #[test]
    fn test_nil_epsilon_annihilates() {
        let pack = EpsilonPack::Product(vec![Epsilon::Variable(0)]);
        assert!(EpsilonExpr::single(pack).is_zero());
    }
}
