//! Deferred synchronous effects.
//!
//! An [`Effect`] is a description of a computation. Building one, mapping it or
//! chaining it never runs anything; only [`Effect::run`] does, and it is meant
//! to be called once, at the edge of the program.
//!
//! Every step runs behind a panic guard, so a step that panics yields
//! `Fin::Fail` and the rest of the chain is skipped.
//!
//! # Examples
//!
//! ```rust
//! use finkit::effect::{Effect, Fin};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let log = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&log);
//!
//! let effect = Effect::new(move || {
//!     counter.set(counter.get() + 1);
//!     10
//! })
//! .fmap(|n| n * 2);
//!
//! assert_eq!(log.get(), 0);
//! assert_eq!(effect.run(), Fin::Succ(20));
//! assert_eq!(log.get(), 1);
//! ```

use std::fmt;

use super::attempt::guard;
use super::{Fault, Fin};
use crate::control::Either;

/// A deferred, single-threaded computation producing a [`Fin<A>`].
///
/// # Monad Laws
///
/// Compared by the outcome of `run`:
///
/// 1. **Left Identity**: `Effect::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(Effect::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
#[must_use = "an Effect does nothing until it is run"]
pub struct Effect<A> {
    thunk: Box<dyn FnOnce() -> Fin<A>>,
}

impl<A: 'static> Effect<A> {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates an effect from a closure producing a plain value.
    pub fn new<F>(thunk: F) -> Self
    where
        F: FnOnce() -> A + 'static,
    {
        Self::suspend(move || Fin::Succ(thunk()))
    }

    /// Creates an effect from a closure producing a `Result`.
    ///
    /// ```rust
    /// use finkit::effect::{Effect, Fault};
    ///
    /// let effect = Effect::from_result(|| "12".parse::<u8>().map_err(Fault::from_error));
    /// assert_eq!(effect.run().fold(|_| 0, |n| n), 12);
    /// ```
    pub fn from_result<E, F>(thunk: F) -> Self
    where
        E: Into<Fault> + 'static,
        F: FnOnce() -> Result<A, E> + 'static,
    {
        Self::suspend(move || Fin::from_result(thunk()))
    }

    /// Creates an effect from a closure producing an outcome.
    pub fn suspend<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Fin<A> + 'static,
    {
        Self {
            thunk: Box::new(thunk),
        }
    }

    /// An effect that succeeds with `value`.
    pub fn pure(value: A) -> Self {
        Self::from_fin(Fin::Succ(value))
    }

    /// An effect that fails with `fault`.
    pub fn fail(fault: impl Into<Fault>) -> Self {
        Self::from_fin(Fin::Fail(fault.into()))
    }

    /// An effect that yields an already known outcome.
    pub fn from_fin(outcome: Fin<A>) -> Self {
        Self::suspend(move || outcome)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Executes the whole chain once.
    ///
    /// Steps run in order; the first `Fail` that no `catch` handles stops the
    /// chain and becomes the result. Panics never escape this call.
    pub fn run(self) -> Fin<A> {
        guard(self.thunk)
    }

    // =========================================================================
    // Sequencing
    // =========================================================================

    /// Transforms the success value.
    pub fn fmap<B, F>(self, function: F) -> Effect<B>
    where
        F: FnOnce(A) -> B + 'static,
        B: 'static,
    {
        Effect::suspend(move || self.run().fmap(function))
    }

    /// Chains a dependent effect. It is only built and run if `self` succeeds.
    pub fn flat_map<B, F>(self, function: F) -> Effect<B>
    where
        F: FnOnce(A) -> Effect<B> + 'static,
        B: 'static,
    {
        Effect::suspend(move || self.run().flat_map(|value| function(value).run()))
    }

    /// Alias for [`Effect::flat_map`].
    pub fn and_then<B, F>(self, function: F) -> Effect<B>
    where
        F: FnOnce(A) -> Effect<B> + 'static,
        B: 'static,
    {
        self.flat_map(function)
    }

    /// Runs `self`, discards its value, then runs `next`.
    pub fn then<B: 'static>(self, next: Effect<B>) -> Effect<B> {
        self.flat_map(move |_| next)
    }

    /// Runs both effects in order and combines their values.
    pub fn map2<B, C, F>(self, other: Effect<B>, function: F) -> Effect<C>
    where
        F: FnOnce(A, B) -> C + 'static,
        B: 'static,
        C: 'static,
    {
        self.flat_map(move |a| other.fmap(move |b| function(a, b)))
    }

    /// Runs both effects in order and pairs their values.
    pub fn product<B: 'static>(self, other: Effect<B>) -> Effect<(A, B)> {
        self.map2(other, |a, b| (a, b))
    }

    /// Observes the success value without changing it.
    pub fn tap<F>(self, observer: F) -> Self
    where
        F: FnOnce(&A) + 'static,
    {
        self.fmap(move |value| {
            observer(&value);
            value
        })
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Handles a failure of the upstream chain with a substitute outcome.
    ///
    /// ```rust
    /// use finkit::effect::{Effect, Fin};
    ///
    /// let effect = Effect::<i32>::fail("offline").catch(|fault| {
    ///     if fault.message() == "offline" { Fin::Succ(0) } else { Fin::Fail(fault) }
    /// });
    /// assert_eq!(effect.run(), Fin::Succ(0));
    /// ```
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Fin<A> + 'static,
    {
        Self::suspend(move || self.run().recover(handler))
    }

    /// Handles a failure by switching to another effect.
    pub fn recover_with<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Self + 'static,
    {
        Self::suspend(move || self.run().recover(|fault| handler(fault).run()))
    }

    /// Transforms the fault of a failed chain.
    pub fn map_fault<F>(self, function: F) -> Self
    where
        F: FnOnce(Fault) -> Fault + 'static,
    {
        Self::suspend(move || self.run().map_fail(function))
    }

    /// Moves failures into the value as `Left`, so the effect always succeeds.
    pub fn into_either<E, F>(self, on_fault: F) -> Effect<Either<E, A>>
    where
        E: 'static,
        F: FnOnce(Fault) -> E + 'static,
    {
        self.fmap(Either::Right)
            .catch(move |fault| Fin::Succ(Either::Left(on_fault(fault))))
    }
}

impl<A: 'static> Effect<Effect<A>> {
    /// Runs the outer effect, then the effect it produced.
    pub fn flatten(self) -> Effect<A> {
        self.flat_map(|inner| inner)
    }
}

impl<E: 'static, A: 'static> Effect<Either<E, A>> {
    /// Transforms a `Right` value, leaving `Left` untouched.
    pub fn fmap_right<B, F>(self, function: F) -> Effect<Either<E, B>>
    where
        F: FnOnce(A) -> B + 'static,
        B: 'static,
    {
        self.fmap(move |either| either.fmap(function))
    }

    /// Chains the next step on `Right`. A `Left` skips it without running it.
    pub fn flat_map_right<B, F>(self, function: F) -> Effect<Either<E, B>>
    where
        F: FnOnce(A) -> Effect<Either<E, B>> + 'static,
        B: 'static,
    {
        self.flat_map(move |either| match either {
            Either::Left(error) => Effect::pure(Either::Left(error)),
            Either::Right(value) => function(value),
        })
    }
}

impl<A> fmt::Display for Effect<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("<Effect>")
    }
}

impl<A> fmt::Debug for Effect<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Effect(<deferred>)")
    }
}
