//! Property-based tests for `Fin` and `Try`.
//!
//! `Fin` is the terminal outcome every deferred container produces, so the
//! monad laws here underpin the laws of `Effect`, `AsyncEffect` and `Try`.

use finkit::effect::{Fault, Fin, Try, attempt};
use finkit::typeclass::{Applicative, Functor, Monad};
use proptest::prelude::*;
use rstest::rstest;

fn fin_strategy() -> impl Strategy<Value = Fin<i32>> {
    prop_oneof![
        any::<i32>().prop_map(Fin::Succ),
        "[a-z ]{1,12}".prop_map(|message| Fin::Fail(Fault::new(message))),
    ]
}

fn halve(n: i32) -> Fin<i32> {
    if n % 2 == 0 {
        Fin::Succ(n / 2)
    } else {
        Fin::fail(format!("{n} is odd"))
    }
}

fn decrement(n: i32) -> Fin<i32> {
    n.checked_sub(1).map_or_else(|| Fin::fail("underflow"), Fin::Succ)
}

// =============================================================================
// Functor and Monad Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_fin_functor_identity(value in fin_strategy()) {
        prop_assert_eq!(value.clone().fmap(|x| x), value);
    }

    #[test]
    fn prop_fin_functor_composition(value in fin_strategy()) {
        let left = value.clone().fmap(|x: i32| x.wrapping_add(7)).fmap(|x: i32| x.wrapping_mul(2));
        let right = value.fmap(|x: i32| x.wrapping_add(7).wrapping_mul(2));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_fin_left_identity(value: i32) {
        prop_assert_eq!(<Fin<i32> as Applicative>::pure(value).flat_map(halve), halve(value));
    }

    #[test]
    fn prop_fin_right_identity(value in fin_strategy()) {
        prop_assert_eq!(value.clone().flat_map(Fin::Succ), value);
    }

    #[test]
    fn prop_fin_associativity(value in fin_strategy()) {
        let left = value.clone().flat_map(halve).flat_map(decrement);
        let right = value.flat_map(|x| halve(x).flat_map(decrement));

        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_fin_trait_and_inherent_agree(value in fin_strategy()) {
        let inherent = value.clone().flat_map(halve);
        let through_trait = Monad::flat_map(value, halve);

        prop_assert_eq!(inherent, through_trait);
    }
}

// =============================================================================
// Fin behavior
// =============================================================================

#[rstest]
fn map2_reports_leftmost_fault() {
    let first: Fin<i32> = Fin::fail("first");
    let second: Fin<i32> = Fin::fail("second");

    let combined = first.map2(second, |a, b| a + b);

    assert_eq!(combined.fault().map(Fault::message), Some("first"));
}

#[rstest]
fn functor_fmap_through_trait() {
    assert_eq!(Functor::fmap(Fin::Succ(2), |n: i32| n * 10), Fin::Succ(20));
}

#[rstest]
#[case(Ok(3), Fin::Succ(3))]
#[case(Err("broken"), Fin::fail("broken"))]
fn from_result_converts_error(#[case] result: Result<i32, &'static str>, #[case] expected: Fin<i32>) {
    assert_eq!(Fin::from_result(result), expected);
}

#[rstest]
fn recover_replaces_only_failures() {
    assert_eq!(Fin::Succ(1).recover(|_| Fin::Succ(0)), Fin::Succ(1));
    assert_eq!(Fin::<i32>::fail("x").recover(|_| Fin::Succ(0)), Fin::Succ(0));
}

// =============================================================================
// Try
// =============================================================================

#[rstest]
fn attempt_captures_panics() {
    let values: Vec<i32> = Vec::new();

    let outcome = attempt(|| values[3]);

    assert!(outcome.is_fail());
    assert!(outcome.fault().is_some_and(|fault| fault.message().contains("index out of bounds")));
}

#[rstest]
fn try_chains_lazily_and_short_circuits() {
    let mut calls = Vec::new();

    let outcome = Try::of(|| {
        calls.push("parse");
        "not a number"
    })
    .flat_map(|text| Try::of_result(move || text.parse::<i32>().map_err(|error| error.to_string())))
    .fmap(|n| n + 1)
    .run();

    assert!(outcome.is_fail());
    assert_eq!(calls, vec!["parse"]);
}

proptest! {
    #[test]
    fn prop_try_matches_fin(value: i32) {
        let deferred = Try::of(move || value).flat_map(|n| Try::of_result(move || halve(n).into_result())).run();

        prop_assert_eq!(deferred, halve(value));
    }
}
