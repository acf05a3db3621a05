//! Signup data: raw request, validated record and created user.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A signup request as it arrives, before any rule has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    /// Email as typed by the user.
    pub email: String,
    /// Password in clear text.
    pub password: String,
    /// Declared age in years.
    pub age: u32,
}

impl SignupRequest {
    /// Creates a request.
    pub fn new(email: impl Into<String>, password: impl Into<String>, age: u32) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            age,
        }
    }
}

/// A request that passed every rule. The email is normalized.
#[derive(Clone, PartialEq, Eq)]
pub struct SignupRecord {
    email: String,
    password: String,
    age: u32,
}

impl SignupRecord {
    /// Builds a record, trimming and lower-casing the email.
    pub fn new(email: &str, password: impl Into<String>, age: u32) -> Self {
        Self {
            email: normalize_email(email),
            password: password.into(),
            age,
        }
    }

    /// The normalized email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The age in years.
    pub const fn age(&self) -> u32 {
        self.age
    }
}

impl std::fmt::Debug for SignupRecord {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SignupRecord")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("age", &self.age)
            .finish()
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Identifier assigned on insert.
    pub id: Uuid,
    /// Normalized email.
    pub email: String,
}

impl User {
    /// Creates a user with a fresh random id.
    pub fn register(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
        }
    }
}

/// Trims surrounding whitespace and lower-cases an email.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
