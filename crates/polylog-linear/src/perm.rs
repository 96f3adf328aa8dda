//! Sign-tracked permutation enumeration.
//!
//! Antisymmetrized constructions (Plücker-type sums) expand over all
//! permutations of their arguments with the parity of each permutation as a
//! coefficient multiplier. Signs are relative to the order of the input
//! sequence: the identity arrangement always carries +1.

/// Returns every permutation of `items` together with its sign:
/// +1 for even permutations, −1 for odd ones, relative to the input order.
///
/// Uses Heap's algorithm; every step is a single transposition, so the sign
/// simply alternates with each generated arrangement's swap.
#[must_use]
pub fn permutations_with_sign<T: Clone>(items: &[T]) -> Vec<(Vec<T>, i64)> {
    let mut current = items.to_vec();
    let n = current.len();
    let mut ret = vec![(current.clone(), 1)];
    let mut sign = 1;
    let mut counters = vec![0usize; n];

    let mut i = 0;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                current.swap(0, i);
            } else {
                current.swap(counters[i], i);
            }
            sign = -sign;
            ret.push((current.clone(), sign));
            counters[i] += 1;
            i = 0;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
    ret
}
