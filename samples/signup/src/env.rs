//! Dependencies supplied to the signup pipeline at the edge.

use std::sync::Arc;

use crate::config::SignupPolicy;
use crate::repository::{InMemoryUserRepository, UserRepository};

/// Environment read by the signup [`Reader`](finkit::effect::Reader).
#[derive(Clone)]
pub struct SignupEnv {
    /// User storage.
    pub repository: Arc<dyn UserRepository>,
    /// Input rules.
    pub policy: SignupPolicy,
}

impl SignupEnv {
    /// Creates an environment.
    pub fn new(repository: Arc<dyn UserRepository>, policy: SignupPolicy) -> Self {
        Self { repository, policy }
    }

    /// An environment backed by the given in-memory repository.
    pub fn in_memory(repository: &InMemoryUserRepository, policy: SignupPolicy) -> Self {
        Self::new(Arc::new(repository.clone()), policy)
    }
}

impl std::fmt::Debug for SignupEnv {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SignupEnv")
            .field("repository", &"<dyn UserRepository>")
            .field("policy", &self.policy)
            .finish()
    }
}
