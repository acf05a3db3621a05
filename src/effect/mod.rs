//! Deferred computations, fault capture and environment injection.
//!
//! - [`Fault`]: the structured form of an unexpected failure
//! - [`Fin`]: the outcome of running something, `Succ` or `Fail`
//! - [`Try`] / [`attempt`]: run a computation now and capture its faults
//! - [`Effect`]: a deferred synchronous computation
//! - [`AsyncEffect`]: a deferred asynchronous computation (feature `async`)
//! - [`CancellationToken`]: cooperative cancellation between async steps
//! - [`Reader`]: a computation parameterized by an environment
//!
//! Building, mapping and chaining never execute anything. `run` is the edge:
//! it executes the chain once and always returns a [`Fin`], even when a step
//! panics.
//!
//! # Do-Notation with `eff!`
//!
//! ```rust
//! use finkit::eff;
//! use finkit::effect::{Effect, Fin};
//!
//! let effect = eff! {
//!     x <= Effect::pure(5);
//!     y <= Effect::pure(10);
//!     let z = x + y;
//!     Effect::pure(z * 2)
//! };
//! assert_eq!(effect.run(), Fin::Succ(30));
//! ```

mod attempt;
mod deferred;
mod eff_macro;
mod fault;
mod fin;
mod reader;

#[cfg(feature = "async")]
mod async_effect;
#[cfg(feature = "async")]
mod cancel;

pub use attempt::{Try, attempt};
pub use deferred::Effect;
pub use fault::Fault;
pub use fin::Fin;
pub use reader::Reader;

#[cfg(feature = "async")]
pub use async_effect::AsyncEffect;
#[cfg(feature = "async")]
pub use cancel::CancellationToken;
