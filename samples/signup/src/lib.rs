//! Signup sample built on finkit.
//!
//! A signup request goes through three layers:
//!
//! - [`validation`]: accumulating input rules over [`Validation`](finkit::control::Validation)
//! - [`repository`]: the storage capability, reached through [`AsyncEffect`](finkit::effect::AsyncEffect)
//! - [`pipeline`]: a [`Reader`](finkit::effect::Reader) over [`SignupEnv`](env::SignupEnv)
//!   that composes both and is run once at the edge
//!
//! Every outcome is a value: `Fin<Either<DomainError, User>>`.

pub mod config;
pub mod domain;
pub mod env;
pub mod errors;
pub mod pipeline;
pub mod repository;
pub mod stage;
pub mod validation;

pub use config::{ConfigError, SignupPolicy};
pub use domain::{SignupRecord, SignupRequest, User};
pub use env::SignupEnv;
pub use errors::{DomainError, RepositoryError};
pub use pipeline::{SignupOutcome, run_signup, signup};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use stage::SignupStage;
