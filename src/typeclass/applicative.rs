//! Applicative type class - combining independent computations.
//!
//! # Laws
//!
//! ```text
//! pure(id) <*> v == v                         (identity)
//! pure(f) <*> pure(x) == pure(f(x))           (homomorphism)
//! ```
//!
//! For short-circuiting containers `map2` stops at the first failure. For
//! [`Validation`](crate::control::Validation) it evaluates every argument and
//! accumulates all failures in argument order.

use super::functor::Functor;

/// A type class for functors that can combine independent values.
///
/// # Examples
///
/// ```rust
/// use finkit::typeclass::Applicative;
///
/// let x: Option<i32> = <Option<()>>::pure(42);
/// assert_eq!(x, Some(42));
///
/// assert_eq!(Some(1).map3(Some(2), Some(3), |a, b, c| a + b + c), Some(6));
/// ```
pub trait Applicative: Functor {
    /// Lifts a value into the applicative context.
    fn pure<B>(value: B) -> Self::WithType<B>;

    /// Combines two applicative values with a binary function.
    fn map2<B, C, F>(self, other: Self::WithType<B>, function: F) -> Self::WithType<C>
    where
        F: FnOnce(Self::Inner, B) -> C;

    /// Combines three applicative values with a ternary function.
    fn map3<B, C, D, F>(
        self,
        second: Self::WithType<B>,
        third: Self::WithType<C>,
        function: F,
    ) -> Self::WithType<D>
    where
        F: FnOnce(Self::Inner, B, C) -> D;

    /// Pairs two applicative values.
    #[inline]
    fn product<B>(self, other: Self::WithType<B>) -> Self::WithType<(Self::Inner, B)>
    where
        Self: Sized,
    {
        self.map2(other, |a, b| (a, b))
    }
}

impl<A> Applicative for Option<A> {
    #[inline]
    fn pure<B>(value: B) -> Option<B> {
        Some(value)
    }

    #[inline]
    fn map2<B, C, F>(self, other: Option<B>, function: F) -> Option<C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (self, other) {
            (Some(a), Some(b)) => Some(function(a, b)),
            _ => None,
        }
    }

    #[inline]
    fn map3<B, C, D, F>(self, second: Option<B>, third: Option<C>, function: F) -> Option<D>
    where
        F: FnOnce(A, B, C) -> D,
    {
        match (self, second, third) {
            (Some(a), Some(b), Some(c)) => Some(function(a, b, c)),
            _ => None,
        }
    }
}

impl<T, E: Clone> Applicative for Result<T, E> {
    #[inline]
    fn pure<B>(value: B) -> Result<B, E> {
        Ok(value)
    }

    #[inline]
    fn map2<B, C, F>(self, other: Result<B, E>, function: F) -> Result<C, E>
    where
        F: FnOnce(T, B) -> C,
    {
        Ok(function(self?, other?))
    }

    #[inline]
    fn map3<B, C, D, F>(
        self,
        second: Result<B, E>,
        third: Result<C, E>,
        function: F,
    ) -> Result<D, E>
    where
        F: FnOnce(T, B, C) -> D,
    {
        Ok(function(self?, second?, third?))
    }
}
