//! The validated signup pipeline.
//!
//! [`signup`] builds a description only: a [`Reader`] that, given a
//! [`SignupEnv`], yields one [`AsyncEffect`]. [`run_signup`] is the edge that
//! supplies the environment and runs the effect.
//!
//! 1. All input rules run together and every violation is reported.
//! 2. The email is looked up (first suspension point).
//! 3. The user is inserted (second suspension point). The insert is an
//!    atomic compare-and-insert, so losing a race surfaces as a conflict.
//!
//! Repository faults are turned into [`DomainError`] values right around the
//! repository calls; a fault never leaves the pipeline as a `Fail`.

use finkit::control::Either;
use finkit::effect::{AsyncEffect, Fault, Fin, Reader};

use crate::domain::{SignupRecord, SignupRequest, User};
use crate::env::SignupEnv;
use crate::errors::DomainError;
use crate::stage::SignupStage;
use crate::validation::validate_signup;

/// Result of a signup once the effect has run.
pub type SignupOutcome = Fin<Either<DomainError, User>>;

type SignupStep<A> = Reader<SignupEnv, AsyncEffect<Either<DomainError, A>>>;

/// Describes a signup for `request`.
pub fn signup(request: SignupRequest) -> SignupStep<User> {
    validated(request).flat_map_effect(|checked| match checked {
        Either::Left(error) => {
            Reader::lift_async(move || AsyncEffect::pure(Either::Left(error.clone())))
        }
        Either::Right(record) => register(record),
    })
}

/// Supplies `env` and runs the signup for `request`.
///
/// # Examples
///
/// ```rust
/// use signup::config::SignupPolicy;
/// use signup::domain::SignupRequest;
/// use signup::env::SignupEnv;
/// use signup::pipeline::run_signup;
/// use signup::repository::InMemoryUserRepository;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repository = InMemoryUserRepository::new();
/// let env = SignupEnv::in_memory(&repository, SignupPolicy::default());
///
/// let outcome = run_signup(SignupRequest::new("alex@example.com", "VeryStrongPass!", 25), env).await;
/// let email = outcome.fold(|_| None, |result| result.right().map(|user| user.email));
///
/// assert_eq!(email.as_deref(), Some("alex@example.com"));
/// # });
/// ```
pub async fn run_signup(request: SignupRequest, env: SignupEnv) -> SignupOutcome {
    let email = request.email.clone();
    tracing::debug!(stage = %SignupStage::Unvalidated, email = %email, "signup received");

    let outcome = signup(request).run_effect(env).await;

    let stage = SignupStage::terminal_of(&outcome);
    match stage {
        SignupStage::Created => tracing::info!(stage = %stage, email = %email, "signup finished"),
        _ => tracing::warn!(stage = %stage, email = %email, "signup finished"),
    }
    outcome
}

fn validated(request: SignupRequest) -> SignupStep<SignupRecord> {
    Reader::asks(move |env: SignupEnv| {
        let checked = validate_signup(&request, &env.policy)
            .into_either()
            .map_left(DomainError::InputInvalid);
        match &checked {
            Either::Left(error) => {
                tracing::info!(stage = %SignupStage::RejectedInput, email = %request.email, %error, "input rejected");
            }
            Either::Right(record) => {
                tracing::debug!(stage = %SignupStage::Validated, email = %record.email(), "input validated");
            }
        }
        AsyncEffect::pure(checked)
    })
}

fn register(record: SignupRecord) -> SignupStep<User> {
    Reader::asks(move |env: SignupEnv| {
        let repository = env.repository;
        let record = record.clone();
        let email = record.email().to_string();

        tracing::debug!(stage = %SignupStage::Checking, email = %email, "checking email");
        repository
            .email_exists(&email)
            .into_either(|fault| classify(&fault))
            .flat_map_right(move |exists| {
                if exists {
                    tracing::info!(stage = %SignupStage::Conflict, email = %email, "email already registered");
                    return AsyncEffect::pure(Either::Left(DomainError::conflict("email")));
                }
                tracing::debug!(stage = %SignupStage::Inserting, email = %email, "inserting user");
                repository.insert(record).into_either(|fault| classify(&fault))
            })
            .catch(|fault| Fin::Succ(Either::Left(classify(&fault))))
    })
}

fn classify(fault: &Fault) -> DomainError {
    let error = DomainError::from_fault(fault);
    if let DomainError::Infra { detail } = &error {
        tracing::warn!(stage = %SignupStage::InfraFailure, %detail, "repository call failed");
    }
    error
}
