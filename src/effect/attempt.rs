//! Eager fault capture.
//!
//! [`Try`] wraps a computation that might panic or return an error and turns
//! whatever happens into a [`Fin`]. Unlike [`Effect`](super::Effect) it is not
//! `'static`: the thunk may borrow from the caller's stack, since it is meant
//! to be run right where it is built.

use std::panic::{AssertUnwindSafe, catch_unwind};

use super::{Fault, Fin};

/// Runs `body`, turning a panic into `Fin::Fail`.
pub(crate) fn guard<A, F>(body: F) -> Fin<A>
where
    F: FnOnce() -> Fin<A>,
{
    match catch_unwind(AssertUnwindSafe(body)) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let fault = Fault::from_panic(payload);
            tracing::debug!(fault = %fault, "caught panic at execution boundary");
            Fin::Fail(fault)
        }
    }
}

/// Runs a computation immediately and captures its outcome.
///
/// ```rust
/// use finkit::effect::{attempt, Fin};
///
/// let numbers = vec![1, 2, 3];
/// assert_eq!(attempt(|| numbers[1]), Fin::Succ(2));
/// assert!(attempt(|| numbers[10]).is_fail());
/// ```
pub fn attempt<A, F>(thunk: F) -> Fin<A>
where
    F: FnOnce() -> A,
{
    guard(|| Fin::Succ(thunk()))
}

/// A fault-capturing wrapper around a not-yet-run computation.
///
/// # Examples
///
/// ```rust
/// use finkit::effect::Try;
///
/// let input = "42";
/// let parsed = Try::of_result(|| input.parse::<i32>().map_err(|error| error.to_string()))
///     .fmap(|n| n * 2);
///
/// assert_eq!(parsed.fold(|_| 0, |n| n), 84);
/// ```
#[must_use = "a Try does nothing until it is run"]
pub struct Try<'a, A> {
    thunk: Box<dyn FnOnce() -> Fin<A> + 'a>,
}

impl<'a, A: 'a> Try<'a, A> {
    /// Wraps a computation that returns a plain value.
    pub fn of<F>(thunk: F) -> Self
    where
        F: FnOnce() -> A + 'a,
    {
        Self {
            thunk: Box::new(move || Fin::Succ(thunk())),
        }
    }

    /// Wraps a computation that returns a `Result`.
    pub fn of_result<E, F>(thunk: F) -> Self
    where
        E: Into<Fault> + 'a,
        F: FnOnce() -> Result<A, E> + 'a,
    {
        Self {
            thunk: Box::new(move || Fin::from_result(thunk())),
        }
    }

    /// Transforms the value once the computation has succeeded.
    pub fn fmap<B: 'a, F>(self, function: F) -> Try<'a, B>
    where
        F: FnOnce(A) -> B + 'a,
    {
        Try {
            thunk: Box::new(move || self.run().fmap(function)),
        }
    }

    /// Chains another fallible computation.
    pub fn flat_map<B: 'a, F>(self, function: F) -> Try<'a, B>
    where
        F: FnOnce(A) -> Try<'a, B> + 'a,
    {
        Try {
            thunk: Box::new(move || self.run().flat_map(|value| function(value).run())),
        }
    }

    /// Runs the computation. Panics and errors come back as `Fin::Fail`.
    pub fn run(self) -> Fin<A> {
        guard(self.thunk)
    }

    /// Runs the computation and eliminates the outcome.
    pub fn fold<B, OnFail, OnSucc>(self, on_fail: OnFail, on_succ: OnSucc) -> B
    where
        OnFail: FnOnce(Fault) -> B,
        OnSucc: FnOnce(A) -> B,
    {
        self.run().fold(on_fail, on_succ)
    }
}

impl<A> std::fmt::Debug for Try<'_, A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("Try(<thunk>)")
    }
}
