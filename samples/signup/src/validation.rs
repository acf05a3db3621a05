//! Input rules for a signup request.
//!
//! Each rule is an independent [`Validation`]; [`validate_signup`] runs all
//! of them and reports every violated rule, in declared order.

use std::sync::LazyLock;

use finkit::control::Validation;
use regex::Regex;

use crate::config::SignupPolicy;
use crate::domain::{SignupRecord, SignupRequest, normalize_email};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex pattern")
});

/// Checks that the email looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> Validation<String, String> {
    let normalized = normalize_email(email);
    if EMAIL_PATTERN.is_match(&normalized) {
        Validation::success(normalized)
    } else {
        Validation::failure("Email is invalid.".to_string())
    }
}

/// Checks the password length against the policy.
pub fn validate_password(password: &str, policy: &SignupPolicy) -> Validation<String, String> {
    Validation::ensure(
        password.to_string(),
        |password| password.chars().count() >= policy.min_password_length,
        format!(
            "Password must be at least {} chars.",
            policy.min_password_length
        ),
    )
}

/// Checks the age against the policy.
pub fn validate_age(age: u32, policy: &SignupPolicy) -> Validation<String, u32> {
    Validation::ensure(
        age,
        |age| *age >= policy.min_age,
        format!("Age must be >= {}.", policy.min_age),
    )
}

/// Runs every rule and builds the record when all of them pass.
///
/// # Examples
///
/// ```rust
/// use signup::config::SignupPolicy;
/// use signup::domain::SignupRequest;
/// use signup::validation::validate_signup;
///
/// let request = SignupRequest::new("bad", "short", 15);
/// let reasons = validate_signup(&request, &SignupPolicy::default())
///     .fold(|reasons| reasons.into_vec(), |_| Vec::new());
///
/// assert_eq!(
///     reasons,
///     vec![
///         "Email is invalid.".to_string(),
///         "Password must be at least 12 chars.".to_string(),
///         "Age must be >= 18.".to_string(),
///     ]
/// );
/// ```
pub fn validate_signup(
    request: &SignupRequest,
    policy: &SignupPolicy,
) -> Validation<String, SignupRecord> {
    validate_email(&request.email).map3(
        validate_password(&request.password, policy),
        validate_age(request.age, policy),
        |email, password, age| SignupRecord::new(&email, password, age),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EMAIL_REASON: &str = "Email is invalid.";
    const PASSWORD_REASON: &str = "Password must be at least 12 chars.";
    const AGE_REASON: &str = "Age must be >= 18.";

    fn reasons(request: &SignupRequest) -> Vec<String> {
        validate_signup(request, &SignupPolicy::default()).fold(|reasons| reasons.into_vec(), |_| Vec::new())
    }

    #[rstest]
    fn all_rules_fail_in_declared_order() {
        let request = SignupRequest::new("bad", "short", 15);
        assert_eq!(reasons(&request), vec![EMAIL_REASON, PASSWORD_REASON, AGE_REASON]);
    }

    #[rstest]
    fn valid_request_builds_record() {
        let request = SignupRequest::new("alex@example.com", "VeryStrongPass!", 25);
        let record = validate_signup(&request, &SignupPolicy::default());
        assert_eq!(
            record,
            Validation::Success(SignupRecord::new("alex@example.com", "VeryStrongPass!", 25))
        );
    }

    #[rstest]
    #[case(SignupRequest::new("bad", "VeryStrongPass!", 25), vec![EMAIL_REASON])]
    #[case(SignupRequest::new("a@b.io", "short", 25), vec![PASSWORD_REASON])]
    #[case(SignupRequest::new("a@b.io", "VeryStrongPass!", 10), vec![AGE_REASON])]
    #[case(SignupRequest::new("bad", "VeryStrongPass!", 10), vec![EMAIL_REASON, AGE_REASON])]
    #[case(SignupRequest::new("a@b.io", "short", 10), vec![PASSWORD_REASON, AGE_REASON])]
    #[case(SignupRequest::new("bad", "short", 25), vec![EMAIL_REASON, PASSWORD_REASON])]
    fn every_failing_subset_is_reported(#[case] request: SignupRequest, #[case] expected: Vec<&str>) {
        assert_eq!(reasons(&request), expected);
    }

    #[rstest]
    #[case("alex@example.com", true)]
    #[case("  Alex@Example.com  ", true)]
    #[case("no-at-sign.com", false)]
    #[case("two@@example.com", false)]
    #[case("spaces in@example.com", false)]
    #[case("missing@tld", false)]
    fn email_rule(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(validate_email(email).is_success(), valid);
    }

    #[rstest]
    fn policy_values_appear_in_messages() {
        let policy = SignupPolicy {
            min_password_length: 20,
            min_age: 21,
        };
        let request = SignupRequest::new("a@b.io", "short", 20);
        let found = validate_signup(&request, &policy).fold(|reasons| reasons.into_vec(), |_| Vec::new());
        assert_eq!(found, vec!["Password must be at least 20 chars.", "Age must be >= 21."]);
    }

    #[rstest]
    fn password_length_counts_characters() {
        assert!(validate_password("ééééééééééééé", &SignupPolicy::default()).is_success());
    }
}
