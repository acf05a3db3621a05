//! Semigroup type class - types with an associative binary operation.
//!
//! # Laws
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! [`Validation`](crate::control::Validation) relies on the
//! [`NonEmpty`](crate::control::NonEmpty) instance to accumulate failures.
//!
//! # Examples
//!
//! ```rust
//! use finkit::typeclass::Semigroup;
//!
//! let hello = String::from("Hello, ");
//! assert_eq!(hello.combine(String::from("World!")), "Hello, World!");
//!
//! assert_eq!(vec![1, 2].combine(vec![3, 4]), vec![1, 2, 3, 4]);
//! ```

/// A type class for types with an associative binary operation.
pub trait Semigroup {
    /// Combines two values. Must be associative.
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Folds a non-empty sequence of values, starting from `first`.
    #[must_use]
    fn combine_all_from<I>(first: Self, rest: I) -> Self
    where
        Self: Sized,
        I: IntoIterator<Item = Self>,
    {
        rest.into_iter().fold(first, Self::combine)
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_vec_associativity(a: Vec<i32>, b: Vec<i32>, c: Vec<i32>) {
            let left = a.clone().combine(b.clone()).combine(c.clone());
            let right = a.combine(b.combine(c));
            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_string_associativity(a: String, b: String, c: String) {
            let left = a.clone().combine(b.clone()).combine(c.clone());
            let right = a.combine(b.combine(c));
            prop_assert_eq!(left, right);
        }
    }

    #[test]
    fn combine_all_from_preserves_order() {
        let combined = Vec::combine_all_from(vec![1], vec![vec![2, 3], vec![4]]);
        assert_eq!(combined, vec![1, 2, 3, 4]);
    }
}
