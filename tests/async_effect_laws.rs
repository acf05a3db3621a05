#![cfg(feature = "async")]
//! Property-based and scenario tests for `AsyncEffect`.
//!
//! - Functor and monad laws, compared by the `Fin` produced by `run`
//! - Sequential suspension points keep their order
//! - Timeout, cancellation and concurrent composition

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use finkit::effect::{AsyncEffect, CancellationToken, Fault, Fin};
use proptest::prelude::*;
use rstest::rstest;

fn block_on<A>(future: impl Future<Output = A>) -> A {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn guarded(n: i32) -> AsyncEffect<i32> {
    if n > 0 {
        AsyncEffect::pure(n - 1)
    } else {
        AsyncEffect::fail(format!("{n} is not positive"))
    }
}

fn tripled(n: i32) -> AsyncEffect<i32> {
    AsyncEffect::new(move || async move {
        tokio::task::yield_now().await;
        n.wrapping_mul(3)
    })
}

fn outcome_strategy() -> impl Strategy<Value = Fin<i32>> {
    prop_oneof![
        any::<i32>().prop_map(Fin::Succ),
        "[a-z]{1,10}".prop_map(|message| Fin::Fail(Fault::new(message))),
    ]
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_async_functor_identity(outcome in outcome_strategy()) {
        let mapped = block_on(AsyncEffect::from_fin(outcome.clone()).fmap(|x| x).run());

        prop_assert_eq!(mapped, outcome);
    }

    #[test]
    fn prop_async_functor_composition(outcome in outcome_strategy()) {
        let f = |x: i32| x.wrapping_sub(7);
        let g = |x: i32| x.wrapping_mul(5);

        let left = block_on(AsyncEffect::from_fin(outcome.clone()).fmap(f).fmap(g).run());
        let right = block_on(AsyncEffect::from_fin(outcome).fmap(move |x| g(f(x))).run());

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_async_left_identity(value: i32) {
        let left = block_on(AsyncEffect::pure(value).flat_map(guarded).run());
        let right = block_on(guarded(value).run());

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_async_right_identity(outcome in outcome_strategy()) {
        let left = block_on(AsyncEffect::from_fin(outcome.clone()).flat_map(AsyncEffect::pure).run());

        prop_assert_eq!(left, outcome);
    }

    #[test]
    fn prop_async_associativity(outcome in outcome_strategy()) {
        let left = block_on(AsyncEffect::from_fin(outcome.clone()).flat_map(tripled).flat_map(guarded).run());
        let right = block_on(
            AsyncEffect::from_fin(outcome).flat_map(|x| tripled(x).flat_map(guarded)).run(),
        );

        prop_assert_eq!(left, right);
    }
}

// =============================================================================
// Sequencing
// =============================================================================

#[tokio::test]
async fn suspension_points_run_in_declared_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let (first_log, second_log) = (Arc::clone(&log), Arc::clone(&log));

    let effect = AsyncEffect::new(move || async move {
        tokio::task::yield_now().await;
        first_log.lock().unwrap().push("first");
        1
    })
    .flat_map(move |n| {
        AsyncEffect::new(move || async move {
            second_log.lock().unwrap().push("second");
            n + 1
        })
    });

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(effect.run().await, Fin::Succ(2));
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[rstest]
#[case::synchronous_panic(AsyncEffect::from_effect_fn(|| -> i32 { panic!("sync body") }), "sync body")]
#[case::panic_in_continuation(AsyncEffect::pure(1).fmap(|_| -> i32 { panic!("continuation") }), "continuation")]
#[tokio::test]
async fn panics_become_faults(#[case] effect: AsyncEffect<i32>, #[case] message: &str) {
    assert_eq!(effect.run().await.fault().map(Fault::message), Some(message));
}

#[tokio::test]
async fn from_result_lifts_io_errors() {
    let refused = AsyncEffect::<u16>::from_result(|| async {
        Err(io::Error::new(io::ErrorKind::ConnectionRefused, "port closed"))
    })
    .run()
    .await;
    let opened = AsyncEffect::from_result(|| async { Ok::<_, io::Error>(8080_u16) }).run().await;

    let kind = refused.fault().and_then(|fault| fault.cause_as::<io::Error>()).map(io::Error::kind);
    assert_eq!(kind, Some(io::ErrorKind::ConnectionRefused));
    assert_eq!(opened, Fin::Succ(8080));
}

#[tokio::test]
async fn catch_recovers_failed_chain() {
    let outcome = AsyncEffect::<i32>::fail("offline")
        .fmap(|n| n + 1)
        .catch(|fault| if fault.message() == "offline" { Fin::Succ(0) } else { Fin::Fail(fault) })
        .run()
        .await;

    assert_eq!(outcome, Fin::Succ(0));
}

// =============================================================================
// Timeout and cancellation
// =============================================================================

#[tokio::test(start_paused = true)]
async fn timeout_fails_slow_chain() {
    let outcome = AsyncEffect::pure(1)
        .delay(Duration::from_secs(30))
        .timeout(Duration::from_secs(1))
        .run()
        .await;

    assert!(outcome.fault().is_some_and(Fault::is_timeout));
}

#[tokio::test(start_paused = true)]
async fn timeout_does_not_interrupt_started_write() {
    let written = Arc::new(AtomicUsize::new(0));
    let notified = Arc::new(AtomicUsize::new(0));
    let (write_counter, notify_counter) = (Arc::clone(&written), Arc::clone(&notified));

    let outcome = AsyncEffect::new(move || async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        write_counter.fetch_add(1, Ordering::SeqCst);
        "row-1"
    })
    .flat_map(move |row| {
        AsyncEffect::new(move || async move {
            notify_counter.fetch_add(1, Ordering::SeqCst);
            row
        })
    })
    .timeout(Duration::from_millis(500))
    .run()
    .await;

    assert!(outcome.fault().is_some_and(Fault::is_timeout));

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(written.load(Ordering::SeqCst), 1);
    assert_eq!(notified.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn panic_text_mentioning_timeout_is_not_a_timeout() {
    let outcome = AsyncEffect::from_effect_fn(|| -> i32 { panic!("timed out after 30s waiting for db") })
        .run()
        .await;

    let fault = outcome.fault();
    assert!(fault.is_some_and(|fault| !fault.is_timeout() && !fault.is_cancelled()));
}

#[tokio::test(start_paused = true)]
async fn timeout_keeps_fast_chain() {
    let outcome = AsyncEffect::pure(1)
        .delay(Duration::from_millis(10))
        .timeout(Duration::from_secs(1))
        .run()
        .await;

    assert_eq!(outcome, Fin::Succ(1));
}

#[tokio::test]
async fn cancelled_token_stops_before_next_step() {
    let token = CancellationToken::new();
    let ran = Arc::new(Mutex::new(false));
    let ran_flag = Arc::clone(&ran);
    let canceller = token.clone();

    let outcome = AsyncEffect::new(move || async move {
        canceller.cancel();
        1
    })
    .flat_map(move |n| {
        AsyncEffect::new(move || async move {
            *ran_flag.lock().unwrap() = true;
            n
        })
        .checked(token)
    })
    .run()
    .await;

    assert!(outcome.fault().is_some_and(Fault::is_cancelled));
    assert!(!*ran.lock().unwrap());
}

#[tokio::test(start_paused = true)]
async fn par_runs_both_and_reports_first_declared_failure() {
    let both = AsyncEffect::pure(1)
        .delay(Duration::from_secs(2))
        .par(AsyncEffect::pure("two").delay(Duration::from_secs(2)));
    let started = tokio::time::Instant::now();

    assert_eq!(both.run().await, Fin::Succ((1, "two")));
    assert!(started.elapsed() < Duration::from_secs(4));

    let failing = AsyncEffect::<i32>::fail("left").par(AsyncEffect::<i32>::fail("right"));
    assert_eq!(failing.run().await.fault().map(Fault::message), Some("left"));
}
