//! Test-only expression parameterization over plain integer words.

use crate::linear::{ExprParam, Linear};
use crate::lyndon::VectorParam;
use crate::notation;
use crate::pvector::PVector;

/// Terms are words of small integers; the simplest possible family.
pub struct WordExprParam;

impl ExprParam for WordExprParam {
    type Object = Vec<i32>;
    type Storage = PVector<i32, 8>;

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
        i32::try_from(obj.len()).unwrap()
    }
}

impl VectorParam for WordExprParam {
    type Letter = i32;

    fn key_to_letters(key: &Self::Storage) -> Vec<i32> {
        key.to_vec()
    }

    fn letters_to_key(letters: &[i32]) -> Self::Storage {
        PVector::from_slice(letters)
    }
}

pub type WordExpr = Linear<WordExprParam>;
