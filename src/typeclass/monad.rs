//! Monad type class - sequencing dependent computations.
//!
//! # Laws
//!
//! ```text
//! pure(a).flat_map(f) == f(a)                                   (left identity)
//! m.flat_map(pure) == m                                         (right identity)
//! m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g)) (associativity)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use finkit::typeclass::Monad;
//!
//! fn parse_positive(s: &str) -> Option<i32> {
//!     s.parse().ok().filter(|n: &i32| *n > 0)
//! }
//!
//! assert_eq!(Some("7").flat_map(parse_positive), Some(7));
//! assert_eq!(Some("-7").flat_map(parse_positive), None);
//! ```

use super::applicative::Applicative;

/// A type class for applicatives that support dependent sequencing.
pub trait Monad: Applicative {
    /// Applies a function returning a new monad and flattens the result.
    ///
    /// Short-circuits: a failed or absent receiver never calls `function`.
    fn flat_map<B, F>(self, function: F) -> Self::WithType<B>
    where
        F: FnOnce(Self::Inner) -> Self::WithType<B>;

    /// Alias for `flat_map`.
    #[inline]
    fn and_then<B, F>(self, function: F) -> Self::WithType<B>
    where
        Self: Sized,
        F: FnOnce(Self::Inner) -> Self::WithType<B>,
    {
        self.flat_map(function)
    }

    /// Sequences two computations, discarding the first result.
    #[inline]
    fn then<B>(self, next: Self::WithType<B>) -> Self::WithType<B>
    where
        Self: Sized,
    {
        self.flat_map(|_| next)
    }
}

impl<A> Monad for Option<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Option<B>
    where
        F: FnOnce(A) -> Option<B>,
    {
        Self::and_then(self, function)
    }
}

impl<T, E: Clone> Monad for Result<T, E> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Result<B, E>
    where
        F: FnOnce(T) -> Result<B, E>,
    {
        Self::and_then(self, function)
    }
}
