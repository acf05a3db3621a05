//! Deferred asynchronous effects.
//!
//! [`AsyncEffect`] is the asynchronous sibling of [`Effect`](super::Effect):
//! a `Send` description of a chain of asynchronous steps. Nothing is polled
//! until [`AsyncEffect::run`] is awaited. Steps run strictly one after
//! another; [`AsyncEffect::par`] is the only combinator that runs two
//! effects concurrently.
//!
//! # Examples
//!
//! ```rust
//! use finkit::effect::{AsyncEffect, Fin};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let effect = AsyncEffect::new(|| async { 20 })
//!     .fmap(|n| n + 1)
//!     .flat_map(|n| AsyncEffect::pure(n * 2));
//!
//! assert_eq!(effect.run().await, Fin::Succ(42));
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::time::Duration;

use futures::FutureExt;

use super::attempt::guard;
use super::{CancellationToken, Fault, Fin};
use crate::control::Either;

type BoxedStep<A> = Box<dyn FnOnce() -> Pin<Box<dyn Future<Output = Fin<A>> + Send>> + Send>;

/// A deferred asynchronous computation producing a [`Fin<A>`].
#[must_use = "an AsyncEffect does nothing until it is run"]
pub struct AsyncEffect<A> {
    thunk: BoxedStep<A>,
}

static_assertions::assert_impl_all!(AsyncEffect<i32>: Send);

tokio::task_local! {
    static DEADLINES: Deadlines;
}

/// Timeouts enclosing the chain currently running on this task.
#[derive(Clone, Default)]
struct Deadlines(Vec<(CancellationToken, Duration)>);

impl Deadlines {
    fn with(mut self, token: CancellationToken, duration: Duration) -> Self {
        self.0.push((token, duration));
        self
    }

    fn expired(&self) -> Option<Fault> {
        self.0
            .iter()
            .find(|(token, _)| token.is_cancelled())
            .map(|(_, duration)| Fault::timed_out(*duration))
    }
}

/// The timeout fault if an enclosing `timeout` has already fired.
fn expired_deadline() -> Option<Fault> {
    DEADLINES.try_with(Deadlines::expired).ok().flatten()
}

// =============================================================================
// Constructors
// =============================================================================

impl<A: Send + 'static> AsyncEffect<A> {
    /// Creates an effect from an async closure producing a plain value.
    ///
    /// The closure is not called until the effect is run.
    pub fn new<F, Fut>(thunk: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::suspend(move || thunk().map(Fin::Succ))
    }

    /// Creates an effect from an async closure producing a `Result`.
    pub fn from_result<E, F, Fut>(thunk: F) -> Self
    where
        E: Into<Fault> + 'static,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<A, E>> + Send + 'static,
    {
        Self::suspend(move || thunk().map(Fin::from_result))
    }

    /// Creates an effect from an async closure producing an outcome.
    pub fn suspend<F, Fut>(thunk: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Fin<A>> + Send + 'static,
    {
        Self {
            thunk: Box::new(move || Box::pin(thunk())),
        }
    }

    /// Creates an effect from a future that has not been polled yet.
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = A> + Send + 'static,
    {
        Self::suspend(move || future.map(Fin::Succ))
    }

    /// Lifts a synchronous closure. It runs when the effect is polled.
    pub fn from_effect_fn<F>(thunk: F) -> Self
    where
        F: FnOnce() -> A + Send + 'static,
    {
        Self::suspend(move || async move { guard(|| Fin::Succ(thunk())) })
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
        Self::suspend(move || std::future::ready(outcome))
    }
}

// =============================================================================
// Execution
// =============================================================================

impl<A: Send + 'static> AsyncEffect<A> {
    /// Executes the whole chain once.
    ///
    /// A panic in any step is caught and returned as `Fin::Fail`.
    pub async fn run(self) -> Fin<A> {
        let thunk = self.thunk;
        match AssertUnwindSafe(async move { thunk().await })
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(payload) => {
                let fault = Fault::from_panic(payload);
                tracing::debug!(fault = %fault, "caught panic in async step");
                Fin::Fail(fault)
            }
        }
    }
}

// =============================================================================
// Sequencing
// =============================================================================

impl<A: Send + 'static> AsyncEffect<A> {
    /// Transforms the success value.
    pub fn fmap<B, F>(self, function: F) -> AsyncEffect<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        AsyncEffect::suspend(move || async move { self.run().await.fmap(function) })
    }

    /// Chains a dependent effect. It is only built and run if `self` succeeds.
    pub fn flat_map<B, F>(self, function: F) -> AsyncEffect<B>
    where
        F: FnOnce(A) -> AsyncEffect<B> + Send + 'static,
        B: Send + 'static,
    {
        AsyncEffect::suspend(move || async move {
            match self.run().await {
                Fin::Succ(value) => match expired_deadline() {
                    Some(fault) => Fin::Fail(fault),
                    None => function(value).run().await,
                },
                Fin::Fail(fault) => Fin::Fail(fault),
            }
        })
    }

    /// Alias for [`AsyncEffect::flat_map`].
    pub fn and_then<B, F>(self, function: F) -> AsyncEffect<B>
    where
        F: FnOnce(A) -> AsyncEffect<B> + Send + 'static,
        B: Send + 'static,
    {
        self.flat_map(function)
    }

    /// Runs `self`, discards its value, then runs `next`.
    pub fn then<B: Send + 'static>(self, next: AsyncEffect<B>) -> AsyncEffect<B> {
        self.flat_map(move |_| next)
    }

    /// Runs both effects one after the other and combines their values.
    pub fn map2<B, C, F>(self, other: AsyncEffect<B>, function: F) -> AsyncEffect<C>
    where
        F: FnOnce(A, B) -> C + Send + 'static,
        B: Send + 'static,
        C: Send + 'static,
    {
        self.flat_map(move |a| other.fmap(move |b| function(a, b)))
    }

    /// Runs both effects one after the other and pairs their values.
    pub fn product<B: Send + 'static>(self, other: AsyncEffect<B>) -> AsyncEffect<(A, B)> {
        self.map2(other, |a, b| (a, b))
    }

    /// Observes the success value without changing it.
    pub fn tap<F>(self, observer: F) -> Self
    where
        F: FnOnce(&A) + Send + 'static,
    {
        self.fmap(move |value| {
            observer(&value);
            value
        })
    }
}

// =============================================================================
// Recovery
// =============================================================================

impl<A: Send + 'static> AsyncEffect<A> {
    /// Handles a failure of the upstream chain with a substitute outcome.
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Fin<A> + Send + 'static,
    {
        Self::suspend(move || async move { self.run().await.recover(handler) })
    }

    /// Handles a failure by switching to another effect.
    pub fn recover_with<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Self + Send + 'static,
    {
        Self::suspend(move || async move {
            match self.run().await {
                Fin::Succ(value) => Fin::Succ(value),
                Fin::Fail(fault) => match expired_deadline() {
                    Some(expired) => Fin::Fail(expired),
                    None => handler(fault).run().await,
                },
            }
        })
    }

    /// Transforms the fault of a failed chain.
    pub fn map_fault<F>(self, function: F) -> Self
    where
        F: FnOnce(Fault) -> Fault + Send + 'static,
    {
        Self::suspend(move || async move { self.run().await.map_fail(function) })
    }

    /// Moves failures into the value as `Left`, so the effect always succeeds.
    pub fn into_either<E, F>(self, on_fault: F) -> AsyncEffect<Either<E, A>>
    where
        E: Send + 'static,
        F: FnOnce(Fault) -> E + Send + 'static,
    {
        self.fmap(Either::Right)
            .catch(move |fault| Fin::Succ(Either::Left(on_fault(fault))))
    }
}

// =============================================================================
// Time, cancellation and concurrency
// =============================================================================

impl<A: Send + 'static> AsyncEffect<A> {
    /// Races the chain against a timer.
    ///
    /// When the timer wins the result is `Fail(Fault::timed_out(duration))`
    /// right away. A step that has already started is not interrupted: the
    /// chain keeps running in the background until that step finishes, and
    /// every later `flat_map` or `recover_with` step is skipped.
    ///
    /// Needs a Tokio runtime, as the chain is spawned onto it.
    ///
    /// ```rust
    /// use finkit::effect::AsyncEffect;
    /// use std::time::Duration;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let slow = AsyncEffect::pure(1).delay(Duration::from_secs(5));
    /// let outcome = slow.timeout(Duration::from_millis(10)).run().await;
    /// assert!(outcome.fault().is_some_and(|fault| fault.is_timeout()));
    /// # });
    /// ```
    pub fn timeout(self, duration: Duration) -> Self {
        Self::suspend(move || async move {
            let token = CancellationToken::new();
            let deadlines = DEADLINES
                .try_with(Deadlines::clone)
                .unwrap_or_default()
                .with(token.clone(), duration);
            let mut chain = tokio::spawn(DEADLINES.scope(deadlines, self.run()));

            tokio::select! {
                biased;
                joined = &mut chain => {
                    joined.unwrap_or_else(|error| Fin::Fail(Fault::from_error(error)))
                }
                () = tokio::time::sleep(duration) => {
                    token.cancel();
                    tracing::debug!(?duration, "async effect timed out, in-flight step left to finish");
                    Fin::Fail(Fault::timed_out(duration))
                }
            }
        })
    }

    /// Adds cancellation checkpoints around this step.
    ///
    /// If `token` is cancelled before the step starts, the step never runs.
    /// A step that has started is allowed to finish; if the token was
    /// cancelled meanwhile, its value is dropped so no later step runs.
    pub fn checked(self, token: CancellationToken) -> Self {
        Self::suspend(move || async move {
            if token.is_cancelled() {
                tracing::debug!("cancellation observed before step");
                return Fin::Fail(Fault::cancelled());
            }
            let outcome = self.run().await;
            if token.is_cancelled() && outcome.is_succ() {
                tracing::debug!("cancellation observed after step");
                return Fin::Fail(Fault::cancelled());
            }
            outcome
        })
    }

    /// Runs both effects concurrently and pairs their values.
    ///
    /// Both effects always run to completion. When both fail, the fault of
    /// `self` is reported.
    pub fn par<B: Send + 'static>(self, other: AsyncEffect<B>) -> AsyncEffect<(A, B)> {
        AsyncEffect::suspend(move || async move {
            let (first, second) = futures::join!(self.run(), other.run());
            first.flat_map(|a| second.fmap(|b| (a, b)))
        })
    }

    /// Waits for `duration` before running the chain.
    pub fn delay(self, duration: Duration) -> Self {
        Self::suspend(move || async move {
            tokio::time::sleep(duration).await;
            self.run().await
        })
    }
}

impl<A: Send + 'static> AsyncEffect<AsyncEffect<A>> {
    /// Runs the outer effect, then the effect it produced.
    pub fn flatten(self) -> AsyncEffect<A> {
        self.flat_map(|inner| inner)
    }
}

impl<E: Send + 'static, A: Send + 'static> AsyncEffect<Either<E, A>> {
    /// Transforms a `Right` value, leaving `Left` untouched.
    pub fn fmap_right<B, F>(self, function: F) -> AsyncEffect<Either<E, B>>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        self.fmap(move |either| either.fmap(function))
    }

    /// Chains the next step on `Right`. A `Left` skips it without running it.
    pub fn flat_map_right<B, F>(self, function: F) -> AsyncEffect<Either<E, B>>
    where
        F: FnOnce(A) -> AsyncEffect<Either<E, B>> + Send + 'static,
        B: Send + 'static,
    {
        self.flat_map(move |either| match either {
            Either::Left(error) => AsyncEffect::pure(Either::Left(error)),
            Either::Right(value) => function(value),
        })
    }
}

impl<A> fmt::Display for AsyncEffect<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("<AsyncEffect>")
    }
}

impl<A> fmt::Debug for AsyncEffect<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("AsyncEffect(<deferred>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    fn display_is_opaque() {
        assert_eq!(format!("{}", AsyncEffect::pure(1)), "<AsyncEffect>");
    }

    #[tokio::test]
    async fn construction_does_not_poll() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let effect = AsyncEffect::new(move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(effect.run().await.is_succ());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn panic_in_async_step_is_caught() {
        let effect = AsyncEffect::pure(1).flat_map(|_| {
            AsyncEffect::new(|| async {
                tokio::task::yield_now().await;
                if true {
                    panic!("async boom");
                }
                0
            })
        });
        assert_eq!(effect.run().await, Fin::Fail(Fault::new("async boom")));
    }

    #[tokio::test]
    async fn failure_skips_later_steps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let outcome = AsyncEffect::<()>::fail("stop")
            .then(AsyncEffect::from_effect_fn(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .run()
            .await;
        assert!(outcome.is_fail());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn catch_turns_failure_into_value() {
        let outcome = AsyncEffect::<i32>::fail("lost")
            .catch(|_| Fin::Succ(0))
            .run()
            .await;
        assert_eq!(outcome, Fin::Succ(0));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_fails_when_timer_wins() {
        let outcome = AsyncEffect::pure(1)
            .delay(Duration::from_secs(60))
            .timeout(Duration::from_secs(1))
            .run()
            .await;
        assert!(outcome.fault().is_some_and(Fault::is_timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_passes_fast_steps_through() {
        let outcome = AsyncEffect::pure(1)
            .timeout(Duration::from_secs(1))
            .run()
            .await;
        assert_eq!(outcome, Fin::Succ(1));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_lets_started_step_finish_and_skips_later_steps() {
        let started = Arc::new(AtomicUsize::new(0));
        let later = Arc::new(AtomicUsize::new(0));
        let (started_counter, later_counter) = (Arc::clone(&started), Arc::clone(&later));

        let outcome = AsyncEffect::new(move || async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            started_counter.fetch_add(1, Ordering::SeqCst);
            1
        })
        .flat_map(move |n| {
            AsyncEffect::new(move || async move {
                later_counter.fetch_add(1, Ordering::SeqCst);
                n + 1
            })
        })
        .timeout(Duration::from_secs(1))
        .run()
        .await;

        assert!(outcome.fault().is_some_and(Fault::is_timeout));
        assert_eq!(started.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(started.load(Ordering::SeqCst), 1);
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn nested_timeout_sees_outer_deadline() {
        let later = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&later);

        let outcome = AsyncEffect::pure(1)
            .delay(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .flat_map(move |n| {
                AsyncEffect::new(move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    n
                })
            })
            .timeout(Duration::from_secs(1))
            .run()
            .await;

        tokio::time::sleep(Duration::from_secs(60)).await;

        assert_eq!(outcome.fault().map(Fault::message), Some("timed out after 1s"));
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn checked_skips_step_when_already_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let outcome = AsyncEffect::from_effect_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .checked(token)
        .run()
        .await;

        assert!(outcome.fault().is_some_and(Fault::is_cancelled));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn checked_lets_started_step_finish_then_stops_chain() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        let steps = Arc::new(AtomicUsize::new(0));
        let first = Arc::clone(&steps);
        let second = Arc::clone(&steps);

        let outcome = AsyncEffect::from_effect_fn(move || {
            first.fetch_add(1, Ordering::SeqCst);
            canceller.cancel();
        })
        .checked(token)
        .then(AsyncEffect::from_effect_fn(move || {
            second.fetch_add(1, Ordering::SeqCst);
        }))
        .run()
        .await;

        assert!(outcome.fault().is_some_and(Fault::is_cancelled));
        assert_eq!(steps.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn par_reports_first_declared_failure() {
        let outcome = AsyncEffect::<i32>::fail("left")
            .par(AsyncEffect::<i32>::fail("right"))
            .run()
            .await;
        assert_eq!(outcome, Fin::Fail(Fault::new("left")));
    }

    #[tokio::test(start_paused = true)]
    async fn par_runs_concurrently() {
        let started = tokio::time::Instant::now();
        let outcome = AsyncEffect::pure(1)
            .delay(Duration::from_secs(1))
            .par(AsyncEffect::pure(2).delay(Duration::from_secs(1)))
            .run()
            .await;
        assert_eq!(outcome, Fin::Succ((1, 2)));
        assert!(started.elapsed() < Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn flat_map_right_short_circuits_on_left() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let outcome = AsyncEffect::pure(Either::<&str, i32>::Left("conflict"))
            .flat_map_right(move |n| {
                counter.fetch_add(1, Ordering::SeqCst);
                AsyncEffect::pure(Either::Right(n))
            })
            .run()
            .await;
        assert_eq!(outcome, Fin::Succ(Either::Left("conflict")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn into_either_classifies_fault() {
        let outcome = AsyncEffect::<i32>::fail("io")
            .into_either(|fault| fault.message().len())
            .fmap_right(|n| n + 1)
            .run()
            .await;
        assert_eq!(outcome, Fin::Succ(Either::Left(2)));
    }
}
