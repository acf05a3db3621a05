//! Ordered sequence that always holds at least one element.
//!
//! [`NonEmpty`] is the failure payload of [`Validation`](super::Validation):
//! a failed validation always carries at least one reason, and reasons keep
//! the order in which they were added. Nothing is ever deduplicated.

use std::fmt;

use smallvec::SmallVec;

use crate::typeclass::Semigroup;

/// A non-empty, insertion-ordered sequence.
///
/// # Examples
///
/// ```rust
/// use finkit::control::NonEmpty;
/// use finkit::typeclass::Semigroup;
///
/// let reasons = NonEmpty::singleton("a").combine(NonEmpty::new("b", vec!["c"]));
/// assert_eq!(reasons.into_vec(), vec!["a", "b", "c"]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NonEmpty<T> {
    head: T,
    tail: SmallVec<[T; 4]>,
}

impl<T> NonEmpty<T> {
    /// Creates a sequence holding exactly one element.
    #[inline]
    pub fn singleton(head: T) -> Self {
        Self {
            head,
            tail: SmallVec::new(),
        }
    }

    /// Creates a sequence from a first element and the elements following it.
    pub fn new<I>(head: T, tail: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            head,
            tail: tail.into_iter().collect(),
        }
    }

    /// Builds a sequence from a `Vec`, returning `None` for an empty vector.
    ///
    /// ```rust
    /// use finkit::control::NonEmpty;
    ///
    /// assert!(NonEmpty::<i32>::from_vec(Vec::new()).is_none());
    /// assert_eq!(NonEmpty::from_vec(vec![1, 2]).map(|n| n.len()), Some(2));
    /// ```
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        let mut iterator = items.into_iter();
        iterator.next().map(|head| Self::new(head, iterator))
    }

    /// Appends an element at the end.
    #[inline]
    pub fn push(&mut self, item: T) {
        self.tail.push(item);
    }

    /// Moves every element of `other` to the end of `self`, keeping order.
    pub fn append(&mut self, other: Self) {
        self.tail.reserve(other.len());
        self.tail.push(other.head);
        self.tail.extend(other.tail);
    }

    /// Returns the number of elements. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Always `false`; present for API symmetry with std collections.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the first element.
    #[inline]
    pub const fn first(&self) -> &T {
        &self.head
    }

    /// Returns the last element.
    #[inline]
    pub fn last(&self) -> &T {
        self.tail.last().unwrap_or(&self.head)
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }

    /// Transforms every element, keeping order and length.
    pub fn map<U, F>(self, mut function: F) -> NonEmpty<U>
    where
        F: FnMut(T) -> U,
    {
        let head = function(self.head);
        NonEmpty {
            head,
            tail: self.tail.into_iter().map(function).collect(),
        }
    }

    /// Converts into a `Vec`, keeping order.
    pub fn into_vec(self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.len());
        items.push(self.head);
        items.extend(self.tail);
        items
    }
}

impl<T> Semigroup for NonEmpty<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.append(other);
        self
    }
}

impl<T> IntoIterator for NonEmpty<T> {
    type Item = T;
    type IntoIter = std::iter::Chain<std::iter::Once<T>, smallvec::IntoIter<[T; 4]>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.head).chain(self.tail)
    }
}

impl<T: fmt::Debug> fmt::Debug for NonEmpty<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for NonEmpty<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.head)?;
        for item in &self.tail {
            write!(formatter, "; {item}")?;
        }
        Ok(())
    }
}

impl<T> From<NonEmpty<T>> for Vec<T> {
    fn from(items: NonEmpty<T>) -> Self {
        items.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    fn singleton_has_length_one() {
        let items = NonEmpty::singleton(7);
        assert_eq!(items.len(), 1);
        assert_eq!(items.first(), &7);
        assert_eq!(items.last(), &7);
    }

    #[rstest]
    fn combine_keeps_duplicates_in_order() {
        let combined = NonEmpty::new("x", vec!["y"]).combine(NonEmpty::new("x", vec!["z"]));
        assert_eq!(combined.into_vec(), vec!["x", "y", "x", "z"]);
    }

    #[rstest]
    fn display_joins_with_semicolons() {
        let items = NonEmpty::new("first", vec!["second", "third"]);
        assert_eq!(items.to_string(), "first; second; third");
    }

    #[rstest]
    fn debug_renders_as_list() {
        assert_eq!(format!("{:?}", NonEmpty::new(1, vec![2])), "[1, 2]");
    }

    proptest! {
        #[test]
        fn prop_combine_is_associative(a: Vec<i32>, b: Vec<i32>, c: Vec<i32>, x: i32, y: i32, z: i32) {
            let first = NonEmpty::new(x, a);
            let second = NonEmpty::new(y, b);
            let third = NonEmpty::new(z, c);

            let left = first.clone().combine(second.clone()).combine(third.clone());
            let right = first.combine(second.combine(third));

            prop_assert_eq!(left, right);
        }

        #[test]
        fn prop_combine_concatenates(a: Vec<i32>, b: Vec<i32>, x: i32, y: i32) {
            let mut expected = vec![x];
            expected.extend(a.iter().copied());
            expected.push(y);
            expected.extend(b.iter().copied());

            let combined = NonEmpty::new(x, a).combine(NonEmpty::new(y, b));

            prop_assert_eq!(combined.into_vec(), expected);
        }
    }
}
