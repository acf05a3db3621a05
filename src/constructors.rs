//! Free factory functions for every container.
//!
//! They read well in pipelines and after a glob import of the
//! [prelude](crate::prelude):
//!
//! ```rust
//! use finkit::prelude::*;
//!
//! let checked: Validation<&str, i32> = success(3);
//! let rejected: Validation<&str, i32> = failure("negative");
//!
//! assert!(checked.is_success());
//! assert!(rejected.is_failure());
//! assert_eq!(right::<&str, _>(1).fmap(|n| n + 1), Either::Right(2));
//! assert_eq!(some(2), Some(2));
//! ```

use crate::control::{Either, Validation};
use crate::effect::{Effect, Reader};

#[cfg(feature = "async")]
use crate::effect::AsyncEffect;

pub use crate::effect::attempt;

/// `Some(value)`.
#[inline]
pub const fn some<T>(value: T) -> Option<T> {
    Some(value)
}

/// `None`.
#[inline]
pub const fn none<T>() -> Option<T> {
    None
}

/// A successful disjoint value.
#[inline]
pub const fn right<L, R>(value: R) -> Either<L, R> {
    Either::Right(value)
}

/// A failed disjoint value.
#[inline]
pub const fn left<L, R>(error: L) -> Either<L, R> {
    Either::Left(error)
}

/// A successful validation.
#[inline]
pub const fn success<E, A>(value: A) -> Validation<E, A> {
    Validation::Success(value)
}

/// A validation failed for a single reason.
#[inline]
pub fn failure<E, A>(reason: E) -> Validation<E, A> {
    Validation::failure(reason)
}

/// A deferred synchronous effect. Nothing runs until [`Effect::run`].
pub fn effect_of<A, F>(thunk: F) -> Effect<A>
where
    A: 'static,
    F: FnOnce() -> A + 'static,
{
    Effect::new(thunk)
}

/// A deferred asynchronous effect. Nothing is polled until [`AsyncEffect::run`].
#[cfg(feature = "async")]
pub fn async_effect_of<A, F, Fut>(thunk: F) -> AsyncEffect<A>
where
    A: Send + 'static,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = A> + Send + 'static,
{
    AsyncEffect::new(thunk)
}

/// A reader over the environment `R`.
pub fn reader_of<R, A, F>(function: F) -> Reader<R, A>
where
    R: 'static,
    A: 'static,
    F: Fn(R) -> A + Send + Sync + 'static,
{
    Reader::new(function)
}
