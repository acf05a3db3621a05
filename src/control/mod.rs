//! Data containers for absence, disjoint failure and accumulated failure.
//!
//! - [`Optional`] / [`OptionalExt`]: zero-or-one value, on top of `Option`
//! - [`Either`]: exactly one of a failure or a success; short-circuits
//! - [`Validation`]: success or a [`NonEmpty`] list of reasons; accumulates
//!
//! # Examples
//!
//! ```rust
//! use finkit::control::{Either, Validation};
//!
//! let checked: Validation<&str, i32> = Validation::failure("too small")
//!     .map2(Validation::failure("too odd"), |a: i32, b: i32| a + b);
//! assert_eq!(checked.failures().map(|r| r.len()), Some(2));
//!
//! let first_only: Either<&str, i32> = Either::Left("too small")
//!     .flat_map(|a: i32| Either::Left::<&str, i32>("too odd").fmap(move |b| a + b));
//! assert_eq!(first_only, Either::Left("too small"));
//! ```

mod either;
mod non_empty;
mod optional;
mod validation;

pub use either::Either;
pub use non_empty::NonEmpty;
pub use optional::{Optional, OptionalExt};
pub use validation::Validation;
