//! Environment-reading computations.
//!
//! A `Reader<R, A>` wraps a function `R -> A`. Composing readers threads the
//! same environment through every step, so dependencies are supplied once,
//! at the edge, by the single call to [`Reader::run`].
//!
//! When the value produced by a reader is itself a deferred effect, the
//! `*_effect` combinators sequence the effects so that `run(env)` yields one
//! runnable effect rather than an effect buried inside another layer.
//!
//! # Laws
//!
//! - Identity: `reader.fmap(|x| x) == reader`
//! - Composition: `reader.fmap(f).fmap(g) == reader.fmap(|x| g(f(x)))`
//! - Left Identity: `Reader::pure(a).flat_map(f) == f(a)`
//! - Ask Retrieval: `Reader::ask().run(r) == r`
//!
//! # Examples
//!
//! ```rust
//! use finkit::effect::Reader;
//!
//! #[derive(Clone)]
//! struct Config {
//!     port: u16,
//!     host: String,
//! }
//!
//! fn address() -> Reader<Config, String> {
//!     Reader::asks(|config: Config| config.host)
//!         .map2(Reader::asks(|config: Config| config.port), |host, port| format!("{host}:{port}"))
//! }
//!
//! let config = Config { port: 8080, host: "localhost".to_string() };
//! assert_eq!(address().run(config), "localhost:8080");
//! ```

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "async")]
use super::AsyncEffect;
use super::{Effect, Fin};

/// A computation that reads from an environment of type `R`.
///
/// The wrapped function is shared behind an `Arc`, so readers are cheap to
/// clone and can be captured by `Send` async closures.
pub struct Reader<R, A> {
    run_function: Arc<dyn Fn(R) -> A + Send + Sync>,
}

impl<R: 'static, A: 'static> Reader<R, A> {
    /// Creates a reader from a function of the environment.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self {
            run_function: Arc::new(function),
        }
    }

    /// Supplies the environment and computes the value.
    pub fn run(&self, environment: R) -> A {
        (self.run_function)(environment)
    }

    /// A reader that ignores the environment.
    pub fn pure(value: A) -> Self
    where
        A: Clone + Send + Sync,
    {
        Self::new(move |_| value.clone())
    }

    /// Projects a value out of the environment.
    pub fn asks<F>(projection: F) -> Self
    where
        F: Fn(R) -> A + Send + Sync + 'static,
    {
        Self::new(projection)
    }

    /// Runs `computation` against an environment modified by `modifier`.
    pub fn local<F>(modifier: F, computation: Self) -> Self
    where
        F: Fn(R) -> R + Send + Sync + 'static,
    {
        let computation_function = computation.run_function;
        Self::new(move |environment| computation_function(modifier(environment)))
    }

    /// Transforms the value.
    pub fn fmap<B, F>(self, function: F) -> Reader<R, B>
    where
        F: Fn(A) -> B + Send + Sync + 'static,
        B: 'static,
    {
        let original_function = self.run_function;
        Reader::new(move |environment| function(original_function(environment)))
    }

    /// Chains a reader that depends on this reader's value.
    /// Both see the same environment.
    pub fn flat_map<B, F>(self, function: F) -> Reader<R, B>
    where
        F: Fn(A) -> Reader<R, B> + Send + Sync + 'static,
        B: 'static,
        R: Clone,
    {
        let original_function = self.run_function;
        Reader::new(move |environment: R| {
            let value = original_function(environment.clone());
            function(value).run(environment)
        })
    }

    /// Alias for [`Reader::flat_map`].
    pub fn and_then<B, F>(self, function: F) -> Reader<R, B>
    where
        F: Fn(A) -> Reader<R, B> + Send + Sync + 'static,
        B: 'static,
        R: Clone,
    {
        self.flat_map(function)
    }

    /// Combines two independent readers over the same environment.
    pub fn map2<B, C, F>(self, other: Reader<R, B>, function: F) -> Reader<R, C>
    where
        F: Fn(A, B) -> C + Send + Sync + 'static,
        B: 'static,
        C: 'static,
        R: Clone,
    {
        let self_function = self.run_function;
        let other_function = other.run_function;
        Reader::new(move |environment: R| {
            let a = self_function(environment.clone());
            let b = other_function(environment);
            function(a, b)
        })
    }

    /// Pairs the values of two readers.
    pub fn product<B: 'static>(self, other: Reader<R, B>) -> Reader<R, (A, B)>
    where
        R: Clone,
    {
        self.map2(other, |a, b| (a, b))
    }
}

impl<R: Clone + Send + Sync + 'static> Reader<R, R> {
    /// A reader that yields the environment itself.
    pub fn ask() -> Self {
        Self::new(|environment| environment)
    }
}

impl<R: Clone + 'static, A: 'static> Reader<R, Reader<R, A>> {
    /// Runs the inner reader with the same environment.
    pub fn flatten(self) -> Reader<R, A> {
        self.flat_map(|inner| inner)
    }
}

// =============================================================================
// Layering with Effect
// =============================================================================

impl<R: Clone + 'static, A: 'static> Reader<R, Effect<A>> {
    /// Builds an effect-producing reader that ignores the environment.
    pub fn lift<F>(factory: F) -> Self
    where
        F: Fn() -> Effect<A> + Send + Sync + 'static,
    {
        Self::new(move |_| factory())
    }

    /// Transforms the success value of the produced effect.
    pub fn fmap_effect<B, F>(self, function: F) -> Reader<R, Effect<B>>
    where
        F: Fn(A) -> B + Clone + Send + Sync + 'static,
        B: 'static,
    {
        self.fmap(move |effect| effect.fmap(function.clone()))
    }

    /// Sequences a dependent reader-of-effect after this one.
    ///
    /// The nested reader sees the same environment and its effect only runs
    /// if the outer effect succeeded, so `run(env)` yields a single effect.
    pub fn flat_map_effect<B, F>(self, function: F) -> Reader<R, Effect<B>>
    where
        F: Fn(A) -> Reader<R, Effect<B>> + Send + Sync + 'static,
        B: 'static,
    {
        let outer = self.run_function;
        let function = Arc::new(function);
        Reader::new(move |environment: R| {
            let next = Arc::clone(&function);
            outer(environment.clone()).flat_map(move |value| next(value).run(environment))
        })
    }

    /// Supplies the environment and runs the resulting effect.
    pub fn run_effect(&self, environment: R) -> Fin<A> {
        self.run(environment).run()
    }
}

#[cfg(feature = "async")]
impl<R, A> Reader<R, AsyncEffect<A>>
where
    R: Clone + Send + 'static,
    A: Send + 'static,
{
    /// Builds an async-effect-producing reader that ignores the environment.
    pub fn lift_async<F>(factory: F) -> Self
    where
        F: Fn() -> AsyncEffect<A> + Send + Sync + 'static,
    {
        Self::new(move |_| factory())
    }

    /// Transforms the success value of the produced effect.
    pub fn fmap_effect<B, F>(self, function: F) -> Reader<R, AsyncEffect<B>>
    where
        F: Fn(A) -> B + Clone + Send + Sync + 'static,
        B: Send + 'static,
    {
        self.fmap(move |effect| effect.fmap(function.clone()))
    }

    /// Sequences a dependent reader-of-effect after this one.
    ///
    /// ```rust
    /// use finkit::effect::{AsyncEffect, Fin, Reader};
    ///
    /// let base: Reader<i32, AsyncEffect<i32>> = Reader::new(|env| AsyncEffect::pure(env));
    /// let doubled = base.flat_map_effect(|n| Reader::new(move |env: i32| AsyncEffect::pure(n + env)));
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// assert_eq!(doubled.run(21).run().await, Fin::Succ(42));
    /// # });
    /// ```
    pub fn flat_map_effect<B, F>(self, function: F) -> Reader<R, AsyncEffect<B>>
    where
        F: Fn(A) -> Reader<R, AsyncEffect<B>> + Send + Sync + 'static,
        B: Send + 'static,
    {
        let outer = self.run_function;
        let function = Arc::new(function);
        Reader::new(move |environment: R| {
            let next = Arc::clone(&function);
            outer(environment.clone()).flat_map(move |value| next(value).run(environment))
        })
    }

    /// Supplies the environment and runs the resulting effect.
    pub async fn run_effect(&self, environment: R) -> Fin<A> {
        self.run(environment).run().await
    }
}

impl<R, A> Clone for Reader<R, A> {
    fn clone(&self) -> Self {
        Self {
            run_function: Arc::clone(&self.run_function),
        }
    }
}

impl<R, A> fmt::Display for Reader<R, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("<Reader>")
    }
}

impl<R, A> fmt::Debug for Reader<R, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Reader(<function>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone)]
    struct Settings {
        base: i32,
        label: &'static str,
    }

    #[rstest]
    fn display_reader() {
        let reader: Reader<i32, i32> = Reader::new(|environment| environment * 2);
        assert_eq!(format!("{reader}"), "<Reader>");
    }

    #[rstest]
    fn ask_returns_environment() {
        assert_eq!(Reader::<i32, i32>::ask().run(7), 7);
    }

    #[rstest]
    fn flat_map_threads_same_environment() {
        let reader = Reader::asks(|settings: Settings| settings.base)
            .flat_map(|base| Reader::asks(move |settings: Settings| format!("{}={base}", settings.label)));
        let settings = Settings { base: 3, label: "x" };
        assert_eq!(reader.run(settings), "x=3");
    }

    #[rstest]
    fn local_modifies_environment_for_inner_only() {
        let inner = Reader::asks(|settings: Settings| settings.base);
        let reader = Reader::local(
            |settings: Settings| Settings { base: settings.base * 10, ..settings },
            inner,
        );
        assert_eq!(reader.run(Settings { base: 2, label: "" }), 20);
    }

    #[rstest]
    fn flatten_runs_inner_with_same_environment() {
        let nested: Reader<i32, Reader<i32, i32>> =
            Reader::new(|outer| Reader::new(move |inner| outer + inner));
        assert_eq!(nested.flatten().run(5), 10);
    }

    #[rstest]
    fn flat_map_effect_yields_single_runnable_effect() {
        let reader: Reader<i32, Effect<i32>> = Reader::new(|environment| Effect::pure(environment));
        let chained = reader
            .flat_map_effect(|n| Reader::new(move |environment: i32| Effect::pure(n * environment)))
            .fmap_effect(|n| n + 1);
        assert_eq!(chained.run_effect(4), Fin::Succ(17));
    }

    #[rstest]
    fn flat_map_effect_skips_inner_after_failure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let reader: Reader<i32, Effect<i32>> = Reader::lift(|| Effect::fail("down"));
        let chained = reader.flat_map_effect(move |n| {
            counter.fetch_add(1, Ordering::SeqCst);
            Reader::new(move |_: i32| Effect::pure(n))
        });
        assert!(chained.run_effect(0).is_fail());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    fn running_reader_does_not_run_effect() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let reader: Reader<(), Effect<()>> = Reader::new(move |()| {
            let counter = Arc::clone(&counter);
            Effect::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        });
        let effect = reader.run(());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(effect.run().is_succ());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn async_layering_runs_in_order() {
        let reader: Reader<i32, AsyncEffect<Vec<i32>>> =
            Reader::new(|environment| AsyncEffect::pure(vec![environment]));
        let chained = reader.flat_map_effect(|seen| {
            Reader::new(move |environment: i32| {
                let mut seen = seen.clone();
                seen.push(environment + 1);
                AsyncEffect::pure(seen)
            })
        });
        assert_eq!(chained.run_effect(1).await, Fin::Succ(vec![1, 2]));
    }
}
