//! Shared display atoms.
//!
//! Rendering is a pure function of term content and never participates in
//! equality or hashing. Generator families use these separators so that
//! expressions of different families read consistently.

/// Separator between tensor factors of a term.
pub const TENSOR: &str = " ⊗ ";

/// Separator between the parts of an iterated co-expression term.
pub const COPROD_ITERATED: &str = " ⊗ ";

/// Separator between the parts of a normal (iteration-insensitive)
/// co-expression term.
pub const COPROD_NORMAL: &str = " ∧ ";

/// Separator between the parts of a Hopf-style co-expression term.
pub const COPROD_HOPF: &str = " ⊠ ";

/// Rendering of the empty product.
pub const UNITY: &str = "<1>";

/// Formats a coefficient as a leading sign group: `+`, `-`, `+2`, `-3`.
#[must_use]
pub fn coeff_prefix(coeff: i64) -> String {
    match coeff {
        1 => "+".to_string(),
        -1 => "-".to_string(),
        c if c >= 0 => format!("+{c}"),
        c => format!("{c}"),
    }
}

/// Joins rendered items with a separator.
#[must_use]
pub fn join<T: AsRef<str>>(items: impl IntoIterator<Item = T>, sep: &str) -> String {
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coeff_prefix() {
        assert_eq!(coeff_prefix(1), "+");
        assert_eq!(coeff_prefix(-1), "-");
        assert_eq!(coeff_prefix(3), "+3");
        assert_eq!(coeff_prefix(-12), "-12");
    }
}
