//! User storage capability.
//!
//! The pipeline only sees [`UserRepository`]. The in-memory implementation
//! keeps every user in one map behind a mutex, and its insert checks and
//! writes under a single lock, so two racing signups for the same email can
//! never both succeed.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use finkit::effect::{AsyncEffect, Fin};
use parking_lot::Mutex;

use crate::domain::{SignupRecord, User};
use crate::errors::RepositoryError;

/// Storage operations the signup pipeline depends on.
///
/// Both operations are deferred: calling them only describes the work.
pub trait UserRepository: Send + Sync {
    /// Whether a user with this normalized email exists.
    fn email_exists(&self, email: &str) -> AsyncEffect<bool>;

    /// Stores a new user.
    ///
    /// Must be an atomic compare-and-insert: when the email is already
    /// stored the effect fails with [`RepositoryError::EmailTaken`] as the
    /// fault cause, whatever an earlier `email_exists` reported.
    fn insert(&self, record: SignupRecord) -> AsyncEffect<User>;
}

/// A [`UserRepository`] holding users in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    /// Whether no user is stored.
    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }

    /// Looks a user up by normalized email.
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.lock().get(email).cloned()
    }

    fn insert_if_absent(&self, record: &SignupRecord) -> Result<User, RepositoryError> {
        let mut users = self.users.lock();
        match users.entry(record.email().to_string()) {
            Entry::Occupied(_) => Err(RepositoryError::EmailTaken {
                email: record.email().to_string(),
            }),
            Entry::Vacant(slot) => {
                let user = User::register(record.email());
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn email_exists(&self, email: &str) -> AsyncEffect<bool> {
        let users = Arc::clone(&self.users);
        let email = email.to_string();
        AsyncEffect::from_effect_fn(move || users.lock().contains_key(&email))
    }

    fn insert(&self, record: SignupRecord) -> AsyncEffect<User> {
        let repository = self.clone();
        AsyncEffect::suspend(move || async move {
            Fin::from_result(repository.insert_if_absent(&record))
        })
    }
}
