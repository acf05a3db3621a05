//! Error types of the signup workflow.
//!
//! - [`DomainError`]: expected business outcomes, delivered as `Left` values
//! - [`RepositoryError`]: failures raised by the user store, carried as the
//!   cause of a [`Fault`] until the pipeline classifies them

use finkit::control::NonEmpty;
use finkit::effect::Fault;
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// DomainError
// =============================================================================

/// An expected signup failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainError {
    /// One or more input rules were violated, in declared rule order.
    #[error("invalid input: {0}")]
    InputInvalid(#[serde(serialize_with = "serialize_reasons")] NonEmpty<String>),

    /// A unique field is already taken.
    #[error("conflict on {field}")]
    Conflict {
        /// Name of the conflicting field.
        field: String,
    },

    /// The store failed unexpectedly.
    #[error("infrastructure failure: {detail}")]
    Infra {
        /// Description of the underlying fault.
        detail: String,
    },
}

impl DomainError {
    /// Conflict on the given field.
    pub fn conflict(field: impl Into<String>) -> Self {
        Self::Conflict {
            field: field.into(),
        }
    }

    /// Infrastructure failure with the given detail.
    pub fn infra(detail: impl Into<String>) -> Self {
        Self::Infra {
            detail: detail.into(),
        }
    }

    /// Classifies a fault raised by the repository.
    ///
    /// A fault caused by [`RepositoryError::EmailTaken`] is a conflict on
    /// `email`; every other fault is an infrastructure failure.
    pub fn from_fault(fault: &Fault) -> Self {
        match fault.cause_as::<RepositoryError>() {
            Some(RepositoryError::EmailTaken { .. }) => Self::conflict("email"),
            _ => Self::infra(fault.to_string()),
        }
    }
}

fn serialize_reasons<S>(reasons: &NonEmpty<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(reasons.iter())
}

// =============================================================================
// RepositoryError
// =============================================================================

/// Failure of a [`UserRepository`](crate::repository::UserRepository) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The compare-and-insert found the email already stored.
    #[error("email already registered: {email}")]
    EmailTaken {
        /// The normalized email.
        email: String,
    },

    /// The backing store is not reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<RepositoryError> for Fault {
    fn from(error: RepositoryError) -> Self {
        Self::from_error(error)
    }
}
