//! # finkit
//!
//! Composable containers for absence, typed failure, error accumulation and
//! deferred side effects.
//!
//! ## Overview
//!
//! - **Type Classes**: `Functor`, `Applicative`, `Monad`, `Semigroup`
//! - **Containers**: `Option` helpers, [`Either`](control::Either),
//!   [`Validation`](control::Validation) with [`NonEmpty`](control::NonEmpty) failures
//! - **Effects**: [`Try`](effect::Try), [`Effect`](effect::Effect),
//!   [`AsyncEffect`](effect::AsyncEffect), [`Reader`](effect::Reader) and the
//!   terminal [`Fin`](effect::Fin) outcome
//! - **Do-notation**: the [`eff!`] macro
//!
//! Every deferred container is a *description*. Nothing observable happens
//! until its `run` method is called, and `run` is meant to be called once, at
//! the edge of the program. Panics raised while running are captured and
//! returned as [`Fin::Fail`](effect::Fin::Fail).
//!
//! ## Feature Flags
//!
//! - `async`: `AsyncEffect`, `CancellationToken` (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` for the data containers
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use finkit::prelude::*;
//!
//! let outcome = effect_of(|| 20)
//!     .fmap(|x| x + 1)
//!     .flat_map(|x| Effect::pure(x * 2))
//!     .run();
//!
//! assert_eq!(outcome.fold(|_| 0, |value| value), 42);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the containers, the type classes and the free constructors.
///
/// # Usage
///
/// ```rust
/// use finkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::constructors::*;
    pub use crate::control::*;
    pub use crate::effect::*;
    pub use crate::typeclass::*;
}

pub mod constructors;
pub mod control;
pub mod effect;
pub mod typeclass;
