//! Do-notation for `flat_map` chains.
//!
//! [`eff!`](crate::eff) rewrites a block of bindings into nested `flat_map`
//! calls. It works with any value that has a `flat_map` method taking a
//! closure: `Either`, `Fin`, `Effect`, `AsyncEffect`, `Reader`, and `Option`
//! or `Result` once [`Monad`](crate::typeclass::Monad) is in scope.
//!
//! # Syntax
//!
//! - `name <= container;` binds the success value of `container`
//! - `mut name <= container;` binds it mutably
//! - `(a, b) <= container;` destructures a tuple
//! - `_ <= container;` sequences without binding
//! - `let name = expression;` binds a plain value
//! - the last line is the resulting container
//!
//! # Examples
//!
//! ```rust
//! use finkit::eff;
//! use finkit::effect::{Effect, Fin};
//!
//! let effect = eff! {
//!     width <= Effect::pure(3);
//!     height <= Effect::pure(4);
//!     let area = width * height;
//!     Effect::pure(area)
//! };
//! assert_eq!(effect.run(), Fin::Succ(12));
//! ```

/// Chains `flat_map` calls with binding syntax.
///
/// See the [module documentation](crate::effect) for the accepted forms.
#[macro_export]
macro_rules! eff {
    (mut $binding:ident <= $container:expr ; $($rest:tt)+) => {
        $container.flat_map(move |mut $binding| $crate::eff!($($rest)+))
    };

    (_ <= $container:expr ; $($rest:tt)+) => {
        $container.flat_map(move |_| $crate::eff!($($rest)+))
    };

    ($binding:ident <= $container:expr ; $($rest:tt)+) => {
        $container.flat_map(move |$binding| $crate::eff!($($rest)+))
    };

    (($($pattern:tt)*) <= $container:expr ; $($rest:tt)+) => {
        $container.flat_map(move |($($pattern)*)| $crate::eff!($($rest)+))
    };

    (let $binding:ident = $value:expr ; $($rest:tt)+) => {{
        let $binding = $value;
        $crate::eff!($($rest)+)
    }};

    (let ($($pattern:tt)*) = $value:expr ; $($rest:tt)+) => {{
        let ($($pattern)*) = $value;
        $crate::eff!($($rest)+)
    }};

    ($result:expr) => {
        $result
    };
}
