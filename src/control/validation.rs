//! Validation type for error accumulation.
//!
//! Unlike [`Either`], combining independent `Validation`s with
//! [`map2`](Validation::map2) .. [`map5`](Validation::map5) or
//! [`combine_all`](Validation::combine_all) evaluates every argument and
//! collects *all* failure reasons. Reasons are concatenated in the order the
//! validations were listed, never reordered and never deduplicated.
//!
//! [`flat_map`](Validation::flat_map) is still available for dependent steps,
//! and it short-circuits like `Either`.
//!
//! # Examples
//!
//! ```rust
//! use finkit::control::Validation;
//!
//! fn positive(n: i32) -> Validation<String, i32> {
//!     Validation::ensure(n, |n| *n > 0, format!("{n} is not positive"))
//! }
//!
//! let result = positive(-1).map3(positive(2), positive(-3), |a, b, c| a + b + c);
//! assert_eq!(
//!     result.failures().map(|reasons| reasons.clone().into_vec()),
//!     Some(vec!["-1 is not positive".to_string(), "-3 is not positive".to_string()]),
//! );
//! ```

use super::{Either, NonEmpty};
use crate::typeclass::{Applicative, Functor, Semigroup, TypeConstructor};

/// Either a success value or a non-empty, ordered list of failure reasons.
///
/// # Type Parameters
///
/// * `E` - A single failure reason
/// * `A` - The success value
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Validation<E, A> {
    /// Every rule held.
    Success(A),
    /// At least one rule was violated.
    Failure(NonEmpty<E>),
}

impl<E, A> Validation<E, A> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a successful validation.
    #[inline]
    pub const fn success(value: A) -> Self {
        Self::Success(value)
    }

    /// Creates a failed validation with a single reason.
    #[inline]
    pub fn failure(reason: E) -> Self {
        Self::Failure(NonEmpty::singleton(reason))
    }

    /// Creates a failed validation from several reasons.
    #[inline]
    pub const fn failure_many(reasons: NonEmpty<E>) -> Self {
        Self::Failure(reasons)
    }

    /// Succeeds with `value` when `predicate` holds, otherwise fails with `reason`.
    pub fn ensure<P>(value: A, predicate: P, reason: E) -> Self
    where
        P: FnOnce(&A) -> bool,
    {
        if predicate(&value) {
            Self::Success(value)
        } else {
            Self::failure(reason)
        }
    }

    /// Lifts an `Either`, turning `Left(e)` into a single-reason failure.
    pub fn from_either(either: Either<E, A>) -> Self {
        either.fold(Self::failure, Self::Success)
    }

    /// Lifts a `Result`, turning `Err(e)` into a single-reason failure.
    pub fn from_result(result: Result<A, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(reason) => Self::failure(reason),
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns `true` for `Success`.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for `Failure`.
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the failure reasons, if any.
    #[inline]
    pub const fn failures(&self) -> Option<&NonEmpty<E>> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reasons) => Some(reasons),
        }
    }

    // =========================================================================
    // Functor / Monad-style Operations
    // =========================================================================

    /// Transforms the success value.
    #[inline]
    pub fn fmap<B, F>(self, function: F) -> Validation<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Success(value) => Validation::Success(function(value)),
            Self::Failure(reasons) => Validation::Failure(reasons),
        }
    }

    /// Transforms every failure reason, keeping their order.
    pub fn map_failure<T, F>(self, function: F) -> Validation<T, A>
    where
        F: FnMut(E) -> T,
    {
        match self {
            Self::Success(value) => Validation::Success(value),
            Self::Failure(reasons) => Validation::Failure(reasons.map(function)),
        }
    }

    /// Chains a *dependent* validation step.
    ///
    /// Short-circuits: a `Failure` is returned unchanged and `function` is not
    /// called. Use [`map2`](Self::map2) and friends for independent rules.
    #[inline]
    pub fn flat_map<B, F>(self, function: F) -> Validation<E, B>
    where
        F: FnOnce(A) -> Validation<E, B>,
    {
        match self {
            Self::Success(value) => function(value),
            Self::Failure(reasons) => Validation::Failure(reasons),
        }
    }

    /// Alias for [`flat_map`](Self::flat_map).
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Validation<E, B>
    where
        F: FnOnce(A) -> Validation<E, B>,
    {
        self.flat_map(function)
    }

    /// Eliminates the validation by applying one of two functions.
    #[inline]
    pub fn fold<T, F, G>(self, on_failure: F, on_success: G) -> T
    where
        F: FnOnce(NonEmpty<E>) -> T,
        G: FnOnce(A) -> T,
    {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(reasons) => on_failure(reasons),
        }
    }

    /// Converts into an `Either` carrying every reason on the left.
    #[inline]
    pub fn into_either(self) -> Either<NonEmpty<E>, A> {
        self.fold(Either::Left, Either::Right)
    }

    // =========================================================================
    // Accumulating Combinators
    // =========================================================================

    /// Combines two independent validations, accumulating failures.
    ///
    /// ```rust
    /// use finkit::control::Validation;
    ///
    /// let a: Validation<&str, i32> = Validation::failure("a");
    /// let b: Validation<&str, i32> = Validation::failure("b");
    /// let combined = a.map2(b, |x, y| x + y);
    /// assert_eq!(combined.failures().map(|r| r.clone().into_vec()), Some(vec!["a", "b"]));
    /// ```
    pub fn map2<B, C, F>(self, other: Validation<E, B>, function: F) -> Validation<E, C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (self, other) {
            (Self::Success(a), Validation::Success(b)) => Validation::Success(function(a, b)),
            (Self::Failure(first), Validation::Failure(second)) => {
                Validation::Failure(first.combine(second))
            }
            (Self::Failure(reasons), Validation::Success(_))
            | (Self::Success(_), Validation::Failure(reasons)) => Validation::Failure(reasons),
        }
    }

    /// Pairs two independent validations, accumulating failures.
    #[inline]
    pub fn zip<B>(self, other: Validation<E, B>) -> Validation<E, (A, B)> {
        self.map2(other, |a, b| (a, b))
    }

    /// Combines three independent validations, accumulating failures.
    pub fn map3<B, C, D, F>(
        self,
        second: Validation<E, B>,
        third: Validation<E, C>,
        function: F,
    ) -> Validation<E, D>
    where
        F: FnOnce(A, B, C) -> D,
    {
        self.zip(second)
            .map2(third, |(a, b), c| function(a, b, c))
    }

    /// Combines four independent validations, accumulating failures.
    pub fn map4<B, C, D, R, F>(
        self,
        second: Validation<E, B>,
        third: Validation<E, C>,
        fourth: Validation<E, D>,
        function: F,
    ) -> Validation<E, R>
    where
        F: FnOnce(A, B, C, D) -> R,
    {
        self.zip(second)
            .zip(third)
            .map2(fourth, |((a, b), c), d| function(a, b, c, d))
    }

    /// Combines five independent validations, accumulating failures.
    pub fn map5<B, C, D, G, R, F>(
        self,
        second: Validation<E, B>,
        third: Validation<E, C>,
        fourth: Validation<E, D>,
        fifth: Validation<E, G>,
        function: F,
    ) -> Validation<E, R>
    where
        F: FnOnce(A, B, C, D, G) -> R,
    {
        self.zip(second)
            .zip(third)
            .zip(fourth)
            .map2(fifth, |(((a, b), c), d), g| function(a, b, c, d, g))
    }

    /// Combines any number of independent validations.
    ///
    /// Every item is consumed. The result is `Success` with all values in order,
    /// or `Failure` with the reasons of every failing item, in order.
    ///
    /// ```rust
    /// use finkit::control::Validation;
    ///
    /// let items: Vec<Validation<&str, i32>> = vec![
    ///     Validation::success(1),
    ///     Validation::failure("second"),
    ///     Validation::failure("third"),
    /// ];
    /// let combined = Validation::combine_all(items);
    /// assert_eq!(combined.failures().map(|r| r.len()), Some(2));
    /// ```
    pub fn combine_all<I>(items: I) -> Validation<E, Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        items
            .into_iter()
            .fold(Validation::Success(Vec::new()), |accumulated, item| {
                accumulated.map2(item, |mut values, value| {
                    values.push(value);
                    values
                })
            })
    }

    /// Validates every input with `function`, accumulating failures.
    pub fn traverse<T, I, F>(inputs: I, function: F) -> Validation<E, Vec<A>>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(T) -> Self,
    {
        Self::combine_all(inputs.into_iter().map(function))
    }
}

impl<E, F> Validation<E, F> {
    /// Applies a validated function to a validated argument, accumulating failures.
    ///
    /// Failures of the function come before failures of the argument.
    #[inline]
    pub fn apply<A, B>(self, argument: Validation<E, A>) -> Validation<E, B>
    where
        F: FnOnce(A) -> B,
    {
        self.map2(argument, |function, value| function(value))
    }
}

// =============================================================================
// Type Class Implementations
// =============================================================================

impl<E, A> TypeConstructor for Validation<E, A> {
    type Inner = A;
    type WithType<B> = Validation<E, B>;
}

impl<E: Clone, A> Functor for Validation<E, A> {
    #[inline]
    fn fmap<B, F>(self, function: F) -> Validation<E, B>
    where
        F: FnOnce(A) -> B,
    {
        Self::fmap(self, function)
    }

    #[inline]
    fn fmap_ref<B, F>(&self, function: F) -> Validation<E, B>
    where
        F: FnOnce(&A) -> B,
    {
        match self {
            Self::Success(value) => Validation::Success(function(value)),
            Self::Failure(reasons) => Validation::Failure(reasons.clone()),
        }
    }
}

impl<E: Clone, A> Applicative for Validation<E, A> {
    #[inline]
    fn pure<B>(value: B) -> Validation<E, B> {
        Validation::Success(value)
    }

    #[inline]
    fn map2<B, C, F>(self, other: Validation<E, B>, function: F) -> Validation<E, C>
    where
        F: FnOnce(A, B) -> C,
    {
        Self::map2(self, other, function)
    }

    #[inline]
    fn map3<B, C, D, F>(
        self,
        second: Validation<E, B>,
        third: Validation<E, C>,
        function: F,
    ) -> Validation<E, D>
    where
        F: FnOnce(A, B, C) -> D,
    {
        Self::map3(self, second, third, function)
    }
}
