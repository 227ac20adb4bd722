use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::validation::validate_password;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password does not satisfy the password policy")]
    TooWeak,
}

/// Plaintext password that satisfies the password policy.
///
/// Only lives for the duration of a request; it is hashed before it reaches a store.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if validate_password(value.expose_secret()) {
            Ok(Self(value))
        } else {
            Err(PasswordError::TooWeak)
        }
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// One-way hash of a password, as persisted.
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(hash: Secret<String>) -> Self {
        Self(hash)
    }

    /// A blank hash means the stored row never received a password.
    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().trim().is_empty()
    }
}

impl AsRef<Secret<String>> for PasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_strong_password() {
        let password = Password::try_from(Secret::from("Abc12345!".to_string())).unwrap();
        assert_eq!(password.as_ref().expose_secret(), "Abc12345!");
    }

    #[test]
    fn rejects_weak_password() {
        let result = Password::try_from(Secret::from("password".to_string()));
        assert!(matches!(result, Err(PasswordError::TooWeak)));
    }

    #[test]
    fn blank_hash_is_empty() {
        assert!(PasswordHash::new(Secret::from("  ".to_string())).is_empty());
        assert!(!PasswordHash::new(Secret::from("$argon2id$...".to_string())).is_empty());
    }

    #[test]
    fn debug_output_hides_secret() {
        let password = Password::try_from(Secret::from("Abc12345!".to_string())).unwrap();
        assert!(!format!("{password:?}").contains("Abc12345!"));
    }
}
