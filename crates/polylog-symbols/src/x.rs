//! Extended points: the endpoints of difference generators.

use std::fmt;

/// An extended point: an ordinary variable, its negation, a literal
/// constant, or the undefined point.
///
/// The derived order (variables first, then negated variables, then the
/// constants) is the order difference generators normalize their endpoints
/// by; it is part of term canonicalization and must not change.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum X {
    /// The variable `x_i`, `i >= 1`.
    Var(i32),
    /// The negated variable `-x_i`, `i >= 1`.
    NegVar(i32),
    /// The literal zero.
    Zero,
    /// The point at infinity.
    Infinity,
    /// The undefined point. Any generator touching it is nil.
    Undefined,
}

impl X {
    /// Negates the point. Constants are self-negating; `Undefined` stays
    /// undefined.
    #[must_use]
    pub fn negated(self) -> Self {
        match self {
            X::Var(i) => X::NegVar(i),
            X::NegVar(i) => X::Var(i),
            X::Zero => X::Zero,
            X::Infinity => X::Infinity,
            X::Undefined => X::Undefined,
        }
    }

    /// True for the literal constants (`Zero`, `Infinity`).
    #[must_use]
    pub fn is_constant(self) -> bool {
        matches!(self, X::Zero | X::Infinity)
    }

    /// The variable index behind this point.
    ///
    /// # Panics
    ///
    /// Panics for constants and the undefined point.
    #[must_use]
    pub fn idx(self) -> i32 {
        match self {
            X::Var(i) | X::NegVar(i) => i,
            other => panic!("point has no variable index: {other}"),
        }
    }

    /// The variable index, requiring the plain (non-negated) form.
    ///
    /// # Panics
    ///
    /// Panics unless the point is a plain variable.
    #[must_use]
    pub fn as_simple_var(self) -> i32 {
        match self {
            X::Var(i) => i,
            other => panic!("point is not a simple variable: {other}"),
        }
    }
}

impl From<i32> for X {
    /// Builds a point from a signed index: positive is `Var`, negative is
    /// `NegVar`, zero is `Zero`.
    fn from(idx: i32) -> Self {
        match idx {
            0 => X::Zero,
            i if i > 0 => X::Var(i),
            i => X::NegVar(-i),
        }
    }
}

impl fmt::Display for X {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            X::Var(i) => write!(f, "x{i}"),
            X::NegVar(i) => write!(f, "-x{i}"),
            X::Zero => write!(f, "0"),
            X::Infinity => write!(f, "Inf"),
            X::Undefined => write!(f, "<?>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_round_trips() {
        assert_eq!(X::Var(3).negated(), X::NegVar(3));
        assert_eq!(X::NegVar(3).negated(), X::Var(3));
        assert_eq!(X::Zero.negated(), X::Zero);
    }

    #[test]
    fn test_from_signed_index() {
        assert_eq!(X::from(2), X::Var(2));
        assert_eq!(X::from(-5), X::NegVar(5));
        assert_eq!(X::from(0), X::Zero);
    }

    #[test]
    fn test_variables_order_before_constants() {
        assert!(X::Var(7) < X::NegVar(1));
        assert!(X::NegVar(7) < X::Zero);
        assert!(X::Zero < X::Infinity);
    }

    #[test]
    #[should_panic(expected = "not a simple variable")]
    fn test_as_simple_var_rejects_negated() {
        let _ = X::NegVar(1).as_simple_var();
    }
}
