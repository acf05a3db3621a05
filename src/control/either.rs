//! Either type - a value that is exactly one of two alternatives.
//!
//! `Either<L, R>` holds a `Left(L)` or a `Right(R)`. By convention `Left`
//! carries the failure and `Right` the success, and every sequencing
//! operation short-circuits on the first `Left`.
//!
//! # Examples
//!
//! ```rust
//! use finkit::control::Either;
//!
//! fn parse(input: &str) -> Either<String, i32> {
//!     input.parse().map_err(|_| format!("not a number: {input}")).into()
//! }
//!
//! let sum = parse("20").flat_map(|a| parse("22").fmap(move |b| a + b));
//! assert_eq!(sum, Either::Right(42));
//!
//! let failed = parse("x").flat_map(|a| parse("22").fmap(move |b| a + b));
//! assert_eq!(failed, Either::Left("not a number: x".to_string()));
//! ```

use std::fmt;

use crate::typeclass::{Applicative, Functor, Monad, TypeConstructor};

/// A value that is either a `Left(L)` or a `Right(R)`.
///
/// # Type Parameters
///
/// * `L` - The failure type
/// * `R` - The success type
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The failure alternative.
    Left(L),
    /// The success alternative.
    Right(R),
}

impl<L, R> Either<L, R> {
    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    // =========================================================================
    // Value Extraction
    // =========================================================================

    /// Converts into `Some(l)` for `Left(l)`, `None` otherwise.
    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Converts into `Some(r)` for `Right(r)`, `None` otherwise.
    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Returns a reference to the left value if present.
    #[inline]
    pub const fn left_ref(&self) -> Option<&L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Returns a reference to the right value if present.
    #[inline]
    pub const fn right_ref(&self) -> Option<&R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Returns the right value, or computes one from the left value.
    #[inline]
    pub fn unwrap_or_else<F>(self, function: F) -> R
    where
        F: FnOnce(L) -> R,
    {
        match self {
            Self::Left(value) => function(value),
            Self::Right(value) => value,
        }
    }

    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Applies a function to the right value, leaving a `Left` untouched.
    ///
    /// ```rust
    /// use finkit::control::Either;
    ///
    /// let right: Either<String, i32> = Either::Right(21);
    /// assert_eq!(right.fmap(|x| x * 2), Either::Right(42));
    /// ```
    #[inline]
    pub fn fmap<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Applies a function to the left value, leaving a `Right` untouched.
    #[inline]
    pub fn map_left<T, F>(self, function: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Applies one of two functions depending on the variant.
    #[inline]
    pub fn bimap<T, U, F, G>(self, left_function: F, right_function: G) -> Either<T, U>
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> U,
    {
        match self {
            Self::Left(value) => Either::Left(left_function(value)),
            Self::Right(value) => Either::Right(right_function(value)),
        }
    }

    // =========================================================================
    // Sequencing
    // =========================================================================

    /// Chains a computation on the right value.
    ///
    /// A `Left` is returned as-is and `function` is never called.
    #[inline]
    pub fn flat_map<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> Either<L, T>,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => function(value),
        }
    }

    /// Alias for [`flat_map`](Self::flat_map).
    #[inline]
    pub fn and_then<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> Either<L, T>,
    {
        self.flat_map(function)
    }

    // =========================================================================
    // Elimination
    // =========================================================================

    /// Eliminates the `Either` by applying one of two functions.
    ///
    /// ```rust
    /// use finkit::control::Either;
    ///
    /// let left: Either<i32, String> = Either::Left(42);
    /// assert_eq!(left.fold(|x| x.to_string(), |s| s), "42");
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }

    /// Swaps the `Left` and `Right` variants.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Turns `None` into `Left(error)` and `Some(value)` into `Right(value)`.
    ///
    /// ```rust
    /// use finkit::control::Either;
    ///
    /// assert_eq!(Either::from_optional("missing", Some(1)), Either::Right(1));
    /// assert_eq!(Either::from_optional("missing", None::<i32>), Either::Left("missing"));
    /// ```
    #[inline]
    pub fn from_optional(error: L, optional: Option<R>) -> Self {
        match optional {
            Some(value) => Self::Right(value),
            None => Self::Left(error),
        }
    }

    /// `Ok` becomes `Right`, `Err` becomes `Left`.
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        result.into()
    }

    /// Converts into a `Result`, mapping `Right` to `Ok` and `Left` to `Err`.
    ///
    /// # Errors
    ///
    /// Returns `Err(l)` when this is `Left(l)`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        self.into()
    }

    /// Collects an iterator of `Either`s.
    ///
    /// Returns the first `Left` in iteration order, or every right value when
    /// there is none. Items after the first `Left` are not pulled.
    ///
    /// ```rust
    /// use finkit::control::Either;
    ///
    /// let all: Either<&str, Vec<i32>> =
    ///     Either::sequence(vec![Either::Right(1), Either::Right(2)]);
    /// assert_eq!(all, Either::Right(vec![1, 2]));
    ///
    /// let first_failure: Either<&str, Vec<i32>> =
    ///     Either::sequence(vec![Either::Right(1), Either::Left("a"), Either::Left("b")]);
    /// assert_eq!(first_failure, Either::Left("a"));
    /// ```
    pub fn sequence<I>(items: I) -> Either<L, Vec<R>>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut values = Vec::new();
        for item in items {
            match item {
                Self::Left(error) => return Either::Left(error),
                Self::Right(value) => values.push(value),
            }
        }
        Either::Right(values)
    }
}

// =============================================================================
// Debug / Display Implementations
// =============================================================================

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L: fmt::Display, R: fmt::Display> fmt::Display for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => write!(formatter, "Left({value})"),
            Self::Right(value) => write!(formatter, "Right({value})"),
        }
    }
}

// =============================================================================
// From Implementations
// =============================================================================

impl<L, R> From<Result<R, L>> for Either<L, R> {
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    #[inline]
    fn from(either: Either<L, R>) -> Self {
        match either {
            Either::Left(value) => Err(value),
            Either::Right(value) => Ok(value),
        }
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<L, R> TypeConstructor for Either<L, R> {
    type Inner = R;
    type WithType<B> = Either<L, B>;
}

impl<L: Clone, R> Functor for Either<L, R> {
    #[inline]
    fn fmap<B, F>(self, function: F) -> Either<L, B>
    where
        F: FnOnce(R) -> B,
    {
        Self::fmap(self, function)
    }

    #[inline]
    fn fmap_ref<B, F>(&self, function: F) -> Either<L, B>
    where
        F: FnOnce(&R) -> B,
    {
        match self {
            Self::Left(value) => Either::Left(value.clone()),
            Self::Right(value) => Either::Right(function(value)),
        }
    }
}

impl<L: Clone, R> Applicative for Either<L, R> {
    #[inline]
    fn pure<B>(value: B) -> Either<L, B> {
        Either::Right(value)
    }

    #[inline]
    fn map2<B, C, F>(self, other: Either<L, B>, function: F) -> Either<L, C>
    where
        F: FnOnce(R, B) -> C,
    {
        match (self, other) {
            (Self::Right(a), Either::Right(b)) => Either::Right(function(a, b)),
            (Self::Left(error), _) | (_, Either::Left(error)) => Either::Left(error),
        }
    }

    #[inline]
    fn map3<B, C, D, F>(
        self,
        second: Either<L, B>,
        third: Either<L, C>,
        function: F,
    ) -> Either<L, D>
    where
        F: FnOnce(R, B, C) -> D,
    {
        match (self, second, third) {
            (Self::Right(a), Either::Right(b), Either::Right(c)) => {
                Either::Right(function(a, b, c))
            }
            (Self::Left(error), _, _) | (_, Either::Left(error), _) | (_, _, Either::Left(error)) => {
                Either::Left(error)
            }
        }
    }
}

impl<L: Clone, R> Monad for Either<L, R> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Either<L, B>
    where
        F: FnOnce(R) -> Either<L, B>,
    {
        Self::flat_map(self, function)
    }
}
