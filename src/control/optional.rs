//! Optional values.
//!
//! The optional container is `std::option::Option`: Rust has no null, so
//! absence is already ordinary data. [`OptionalExt`] adds the elimination and
//! conversion operations the rest of the toolkit uses, and the type classes in
//! [`crate::typeclass`] give `Option` its `fmap`/`map2`/`flat_map`.
//!
//! # Examples
//!
//! ```rust
//! use finkit::control::OptionalExt;
//!
//! fn divide(numerator: i32, denominator: i32) -> Option<i32> {
//!     (denominator != 0).then(|| numerator / denominator)
//! }
//!
//! assert_eq!(divide(10, 0).get_or_else(-1), -1);
//! assert_eq!(divide(9, 3).fold(|| "none".to_string(), |n| n.to_string()), "3");
//! ```

use super::{Either, Validation};

/// Alias naming `Option` as the toolkit's optional container.
pub type Optional<T> = Option<T>;

/// Elimination and conversion helpers for `Option`.
pub trait OptionalExt<T>: Sized {
    /// Eliminates the option: `on_none` for `None`, `on_some` for `Some`.
    fn fold<U, N, S>(self, on_none: N, on_some: S) -> U
    where
        N: FnOnce() -> U,
        S: FnOnce(T) -> U;

    /// Returns the value, or `default` when absent.
    fn get_or_else(self, default: T) -> T;

    /// Returns the value, or computes a default when absent.
    fn get_or_else_with<F>(self, default: F) -> T
    where
        F: FnOnce() -> T;

    /// Chains a computation that may itself be absent.
    fn bind<U, F>(self, function: F) -> Option<U>
    where
        F: FnOnce(T) -> Option<U>;

    /// Turns `None` into `Left(error)`.
    fn to_either<L>(self, error: L) -> Either<L, T>;

    /// Turns `None` into a single-reason failure.
    fn to_validation<E>(self, reason: E) -> Validation<E, T>;
}

impl<T> OptionalExt<T> for Option<T> {
    #[inline]
    fn fold<U, N, S>(self, on_none: N, on_some: S) -> U
    where
        N: FnOnce() -> U,
        S: FnOnce(T) -> U,
    {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }

    #[inline]
    fn get_or_else(self, default: T) -> T {
        self.unwrap_or(default)
    }

    #[inline]
    fn get_or_else_with<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.unwrap_or_else(default)
    }

    #[inline]
    fn bind<U, F>(self, function: F) -> Option<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        self.and_then(function)
    }

    #[inline]
    fn to_either<L>(self, error: L) -> Either<L, T> {
        Either::from_optional(error, self)
    }

    #[inline]
    fn to_validation<E>(self, reason: E) -> Validation<E, T> {
        match self {
            Some(value) => Validation::Success(value),
            None => Validation::failure(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn divide(numerator: i32, denominator: i32) -> Option<i32> {
        if denominator == 0 {
            None
        } else {
            Some(numerator / denominator)
        }
    }

    #[rstest]
    #[case(10, 0, None)]
    #[case(9, 3, Some(3))]
    fn divide_models_absence_as_data(
        #[case] numerator: i32,
        #[case] denominator: i32,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(divide(numerator, denominator), expected);
    }

    #[rstest]
    fn bind_on_none_never_calls_function() {
        let mut called = false;
        let result = divide(1, 0).bind(|n| {
            called = true;
            Some(n)
        });
        assert_eq!(result, None);
        assert!(!called);
    }

    #[rstest]
    fn to_either_and_to_validation() {
        assert_eq!(None::<i32>.to_either("missing"), Either::Left("missing"));
        assert!(None::<i32>.to_validation("missing").is_failure());
        assert_eq!(Some(1).to_validation("missing"), Validation::Success(1));
    }
}
