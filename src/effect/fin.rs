//! Terminal outcome of running a deferred computation.

use std::fmt;

use super::Fault;
use crate::typeclass::{Applicative, Functor, Monad, TypeConstructor};

/// The result of running a [`Try`](super::Try), an [`Effect`](super::Effect)
/// or an `AsyncEffect`: either a success value or a caught [`Fault`].
///
/// There is no `unwrap`; [`Fin::fold`] is how a value leaves the outcome.
///
/// # Examples
///
/// ```rust
/// use finkit::effect::{Fault, Fin};
///
/// let succeeded: Fin<i32> = Fin::succ(2);
/// let failed: Fin<i32> = Fin::fail(Fault::new("boom"));
///
/// let render = |outcome: Fin<i32>| outcome.fold(|fault| fault.to_string(), |n| n.to_string());
/// assert_eq!(render(succeeded), "2");
/// assert_eq!(render(failed), "boom");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an outcome should be matched"]
pub enum Fin<A> {
    /// The computation produced a value.
    Succ(A),
    /// The computation failed with a caught fault.
    Fail(Fault),
}

impl<A> Fin<A> {
    /// Wraps a success value.
    #[inline]
    pub const fn succ(value: A) -> Self {
        Self::Succ(value)
    }

    /// Wraps a fault.
    #[inline]
    pub fn fail(fault: impl Into<Fault>) -> Self {
        Self::Fail(fault.into())
    }

    /// Returns `true` for `Succ`.
    #[inline]
    pub const fn is_succ(&self) -> bool {
        matches!(self, Self::Succ(_))
    }

    /// Returns `true` for `Fail`.
    #[inline]
    pub const fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }

    /// Returns the fault of a `Fail`.
    #[inline]
    pub const fn fault(&self) -> Option<&Fault> {
        match self {
            Self::Succ(_) => None,
            Self::Fail(fault) => Some(fault),
        }
    }

    /// Transforms the success value.
    #[inline]
    pub fn fmap<B, F>(self, function: F) -> Fin<B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Succ(value) => Fin::Succ(function(value)),
            Self::Fail(fault) => Fin::Fail(fault),
        }
    }

    /// Transforms the fault.
    #[inline]
    pub fn map_fail<F>(self, function: F) -> Self
    where
        F: FnOnce(Fault) -> Fault,
    {
        match self {
            Self::Succ(value) => Self::Succ(value),
            Self::Fail(fault) => Self::Fail(function(fault)),
        }
    }

    /// Chains a computation on the success value, short-circuiting on `Fail`.
    #[inline]
    pub fn flat_map<B, F>(self, function: F) -> Fin<B>
    where
        F: FnOnce(A) -> Fin<B>,
    {
        match self {
            Self::Succ(value) => function(value),
            Self::Fail(fault) => Fin::Fail(fault),
        }
    }

    /// Alias for [`Fin::flat_map`].
    #[inline]
    pub fn and_then<B, F>(self, function: F) -> Fin<B>
    where
        F: FnOnce(A) -> Fin<B>,
    {
        self.flat_map(function)
    }

    /// Eliminates the outcome. The fault handler comes first.
    #[inline]
    pub fn fold<B, OnFail, OnSucc>(self, on_fail: OnFail, on_succ: OnSucc) -> B
    where
        OnFail: FnOnce(Fault) -> B,
        OnSucc: FnOnce(A) -> B,
    {
        match self {
            Self::Succ(value) => on_succ(value),
            Self::Fail(fault) => on_fail(fault),
        }
    }

    /// Replaces a `Fail` with the outcome produced by `handler`.
    #[inline]
    pub fn recover<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Self,
    {
        match self {
            Self::Succ(value) => Self::Succ(value),
            Self::Fail(fault) => handler(fault),
        }
    }

    /// Converts a `Result`, turning the error into a fault.
    #[inline]
    pub fn from_result<E>(result: Result<A, E>) -> Self
    where
        E: Into<Fault>,
    {
        match result {
            Ok(value) => Self::Succ(value),
            Err(error) => Self::Fail(error.into()),
        }
    }

    /// Converts into a `Result` with the fault as the error.
    #[inline]
    pub fn into_result(self) -> Result<A, Fault> {
        match self {
            Self::Succ(value) => Ok(value),
            Self::Fail(fault) => Err(fault),
        }
    }
}

impl<A> Fin<Fin<A>> {
    /// Removes one level of nesting.
    #[inline]
    pub fn flatten(self) -> Fin<A> {
        self.flat_map(|inner| inner)
    }
}

impl<A: fmt::Display> fmt::Display for Fin<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succ(value) => write!(formatter, "Succ({value})"),
            Self::Fail(fault) => write!(formatter, "Fail({fault})"),
        }
    }
}

impl<A> From<Result<A, Fault>> for Fin<A> {
    fn from(result: Result<A, Fault>) -> Self {
        Self::from_result(result)
    }
}

impl<A> From<Fin<A>> for Result<A, Fault> {
    fn from(outcome: Fin<A>) -> Self {
        outcome.into_result()
    }
}

// =============================================================================
// Type class instances
// =============================================================================

impl<A> TypeConstructor for Fin<A> {
    type Inner = A;
    type WithType<B> = Fin<B>;
}

impl<A> Functor for Fin<A> {
    #[inline]
    fn fmap<B, F>(self, function: F) -> Fin<B>
    where
        F: FnOnce(A) -> B,
    {
        Self::fmap(self, function)
    }

    #[inline]
    fn fmap_ref<B, F>(&self, function: F) -> Fin<B>
    where
        F: FnOnce(&A) -> B,
    {
        match self {
            Self::Succ(value) => Fin::Succ(function(value)),
            Self::Fail(fault) => Fin::Fail(fault.clone()),
        }
    }
}

impl<A> Applicative for Fin<A> {
    #[inline]
    fn pure<B>(value: B) -> Fin<B> {
        Fin::Succ(value)
    }

    #[inline]
    fn map2<B, C, F>(self, other: Fin<B>, function: F) -> Fin<C>
    where
        F: FnOnce(A, B) -> C,
    {
        match (self, other) {
            (Self::Succ(a), Fin::Succ(b)) => Fin::Succ(function(a, b)),
            (Self::Fail(fault), _) | (_, Fin::Fail(fault)) => Fin::Fail(fault),
        }
    }

    #[inline]
    fn map3<B, C, D, F>(self, second: Fin<B>, third: Fin<C>, function: F) -> Fin<D>
    where
        F: FnOnce(A, B, C) -> D,
    {
        self.flat_map(|a| second.flat_map(|b| third.fmap(|c| function(a, b, c))))
    }
}

impl<A> Monad for Fin<A> {
    #[inline]
    fn flat_map<B, F>(self, function: F) -> Fin<B>
    where
        F: FnOnce(A) -> Fin<B>,
    {
        Self::flat_map(self, function)
    }
}
