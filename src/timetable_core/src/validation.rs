//! Credential validation rules shared by every account workflow.
//!
//! Both checks are pure: no lookups, no side effects.

use std::sync::LazyLock;

use regex::Regex;

/// Symbols accepted as the "special character" class of a password.
pub const PASSWORD_SYMBOLS: &str = "#?!@$%^&*-";

/// Minimum number of characters in a password.
pub const PASSWORD_MIN_LENGTH: usize = 8;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is a valid regex")
});

/// Returns `true` when `email` has the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Returns `true` when `password` satisfies the password policy:
/// at least [`PASSWORD_MIN_LENGTH`] characters, one uppercase and one lowercase
/// Latin letter, one digit and one symbol from [`PASSWORD_SYMBOLS`].
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LENGTH
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}
