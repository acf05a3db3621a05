//! Signup policy configuration.
//!
//! The policy is read from the environment once, at startup. Every key is
//! optional and falls back to its default.
//!
//! | Variable | Default |
//! |---|---|
//! | `SIGNUP_MIN_PASSWORD_LENGTH` | 12 |
//! | `SIGNUP_MIN_AGE` | 18 |

use std::str::FromStr;

use thiserror::Error;

/// Environment variable holding the minimum password length.
pub const MIN_PASSWORD_LENGTH_KEY: &str = "SIGNUP_MIN_PASSWORD_LENGTH";
/// Environment variable holding the minimum age.
pub const MIN_AGE_KEY: &str = "SIGNUP_MIN_AGE";

/// Configuration error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable has a value that cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}

/// Rules applied to every signup request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupPolicy {
    /// Minimum number of characters in a password.
    pub min_password_length: usize,
    /// Minimum age in years.
    pub min_age: u32,
}

impl Default for SignupPolicy {
    fn default() -> Self {
        Self {
            min_password_length: 12,
            min_age: 18,
        }
    }
}

impl SignupPolicy {
    /// Loads the policy from the process environment, after reading `.env`
    /// if one is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable is set but cannot be
    /// parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the policy from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value is present but is not
    /// a positive number.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            min_password_length: parsed_or(
                &lookup,
                MIN_PASSWORD_LENGTH_KEY,
                defaults.min_password_length,
            )?,
            min_age: parsed_or(&lookup, MIN_AGE_KEY, defaults.min_age)?,
        })
    }
}

fn parsed_or<T, L>(lookup: &L, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
    L: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<T>()
        .map_err(|error| ConfigError::InvalidValue {
            key: key.to_string(),
            message: error.to_string(),
        })?;
    if value == T::default() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
