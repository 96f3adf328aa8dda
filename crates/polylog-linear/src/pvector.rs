//! Fixed-capacity inline term storage.
//!
//! Terms are compared, hashed and stored by value on the hot paths of the
//! engine, so they must stay heap-free. `PVector` is a value-type small
//! vector with a compile-time capacity bound: pushing past the bound is a
//! programming error and panics, it never spills to the heap.

use std::fmt;
use std::ops::Deref;

use smallvec::SmallVec;

/// A fixed-capacity vector that always stores its elements inline.
///
/// The capacity `N` is chosen per expression family (e.g. 10 generator
/// codes for difference symbols, 2 parts for binary co-expressions).
/// Exceeding it indicates a bug in the caller, not a data condition.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PVector<T, const N: usize> {
    items: SmallVec<[T; N]>,
}

impl<T, const N: usize> PVector<T, N> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }

    /// Appends an element.
    ///
    /// # Panics
    ///
    /// Panics if the vector already holds `N` elements.
    pub fn push(&mut self, item: T) {
        assert!(
            self.items.len() < N,
            "PVector capacity exceeded: bound is {N}"
        );
        self.items.push(item);
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone, const N: usize> PVector<T, N> {
    /// Builds a vector from a slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice holds more than `N` elements.
    #[must_use]
    pub fn from_slice(items: &[T]) -> Self {
        items.iter().cloned().collect()
    }

    /// Concatenates two vectors.
    ///
    /// # Panics
    ///
    /// Panics if the combined length exceeds `N`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        self.items.iter().chain(&other.items).cloned().collect()
    }
}

impl<T, const N: usize> Deref for PVector<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T, const N: usize> FromIterator<T> for PVector<T, N> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ret = Self::new();
        for item in iter {
            ret.push(item);
        }
        ret
    }
}

impl<T, const N: usize> IntoIterator for PVector<T, N> {
    type Item = T;
    type IntoIter = smallvec::IntoIter<[T; N]>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a PVector<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for PVector<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read() {
        let mut v = PVector::<u8, 4>::new();
        v.push(3);
        v.push(1);
        assert_eq!(v.as_slice(), &[3, 1]);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_concat() {
        let a = PVector::<u8, 4>::from_slice(&[1, 2]);
        let b = PVector::<u8, 4>::from_slice(&[3]);
        assert_eq!(a.concat(&b).as_slice(), &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "capacity exceeded")]
    fn test_overflow_panics() {
        let mut v = PVector::<u8, 2>::new();
        v.push(1);
        v.push(2);
        v.push(3);
    }

    #[test]
    fn test_instantiates_with_generic_capacity() {
        // The capacity must be usable as a free const parameter, not just a
        // literal at the use site.
        fn collect_bounded<const N: usize>(items: &[u8]) -> PVector<u8, N> {
            PVector::from_slice(items)
        }
        assert_eq!(collect_bounded::<3>(&[1, 2]).len(), 2);
        assert_eq!(collect_bounded::<8>(&[1, 2, 3]).as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_ordering_is_elementwise() {
        let a = PVector::<u8, 4>::from_slice(&[1, 2]);
        let b = PVector::<u8, 4>::from_slice(&[1, 3]);
        let c = PVector::<u8, 4>::from_slice(&[1, 2, 0]);
        assert!(a < b);
        assert!(a < c);
    }
}
