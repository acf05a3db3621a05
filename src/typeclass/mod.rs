//! Type class traits for functional programming abstractions.
//!
//! - [`TypeConstructor`]: Higher-kinded type emulation through GATs
//! - [`Functor`]: Mapping over container values
//! - [`Applicative`]: Combining independent containers
//! - [`Monad`]: Sequencing dependent computations
//! - [`Semigroup`]: Associative binary operations
//!
//! The containers of this crate ([`Either`](crate::control::Either),
//! [`Validation`](crate::control::Validation), [`Fin`](crate::effect::Fin))
//! implement these traits in their own modules. `Option`, `Result` and `Vec`
//! are covered here.
//!
//! # Examples
//!
//! ```rust
//! use finkit::typeclass::{Applicative, Functor, Monad};
//!
//! let sum = Some(1).map2(Some(2), |x, y| x + y);
//! assert_eq!(sum, Some(3));
//!
//! let doubled = Some(21).fmap(|x| x * 2);
//! assert_eq!(doubled, Some(42));
//!
//! let chained = Some(5).flat_map(|x| if x > 0 { Some(x) } else { None });
//! assert_eq!(chained, Some(5));
//! ```

mod applicative;
mod functor;
mod higher;
mod monad;
mod semigroup;

pub use applicative::Applicative;
pub use functor::Functor;
pub use higher::TypeConstructor;
pub use monad::Monad;
pub use semigroup::Semigroup;
