//! States of a signup as it moves through the pipeline.
//!
//! ```text
//! Unvalidated -> RejectedInput
//!             -> Validated -> Checking -> Conflict
//!                                      -> Inserting -> Created
//!                                                   -> InfraFailure
//! ```

use std::fmt;

use finkit::control::Either;
use finkit::effect::Fin;

use crate::domain::User;
use crate::errors::DomainError;

/// A signup state. Used as a structured field in log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignupStage {
    /// Request received, no rule checked yet.
    Unvalidated,
    /// Every input rule passed.
    Validated,
    /// At least one input rule failed.
    RejectedInput,
    /// Looking the email up.
    Checking,
    /// The email is already registered.
    Conflict,
    /// Storing the user.
    Inserting,
    /// The user was stored.
    Created,
    /// The store failed.
    InfraFailure,
}

impl SignupStage {
    /// Whether no transition leaves this state.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::RejectedInput | Self::Conflict | Self::Created | Self::InfraFailure
        )
    }

    /// The terminal state a pipeline outcome corresponds to.
    pub fn terminal_of(outcome: &Fin<Either<DomainError, User>>) -> Self {
        match outcome {
            Fin::Succ(Either::Right(_)) => Self::Created,
            Fin::Succ(Either::Left(DomainError::InputInvalid(_))) => Self::RejectedInput,
            Fin::Succ(Either::Left(DomainError::Conflict { .. })) => Self::Conflict,
            Fin::Succ(Either::Left(DomainError::Infra { .. })) | Fin::Fail(_) => Self::InfraFailure,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Unvalidated => "unvalidated",
            Self::Validated => "validated",
            Self::RejectedInput => "rejected_input",
            Self::Checking => "checking",
            Self::Conflict => "conflict",
            Self::Inserting => "inserting",
            Self::Created => "created",
            Self::InfraFailure => "infra_failure",
        }
    }
}

impl fmt::Display for SignupStage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}
