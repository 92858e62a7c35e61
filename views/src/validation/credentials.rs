use regex::Regex;
use shared_types::{AuthCredentials, ValidationErrors};
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Validate sign-in and sign-up input.
///
/// Only the first problem is reported, checked in the order the login form
/// shows them. The returned email is trimmed.
pub fn validate_credentials(credentials: AuthCredentials) -> Result<AuthCredentials, ValidationErrors> {
    let email = credentials.email.trim().to_string();
    let mut errors = ValidationErrors::new();

    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if credentials.password.trim().is_empty() {
        errors.add("password", "Password is required");
    } else if credentials.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.add(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_CHARS),
        );
    } else if !EMAIL.is_match(&email) {
        errors.add("email", "Please enter a valid email address");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(AuthCredentials {
        email,
        password: credentials.password,
    })
}
