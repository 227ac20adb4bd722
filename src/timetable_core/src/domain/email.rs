use std::hash::Hash;

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use crate::validation::validate_email;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format")]
    InvalidFormat,
}

/// Email address that passed [`validate_email`].
#[derive(Debug, Clone)]
pub struct Email(Secret<String>);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        Self::try_from(Secret::from(raw.to_owned()))
    }
}

impl TryFrom<Secret<String>> for Email {
    type Error = EmailError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if validate_email(value.expose_secret()) {
            Ok(Self(value))
        } else {
            Err(EmailError::InvalidFormat)
        }
    }
}

impl AsRef<Secret<String>> for Email {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Email {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Email {}

impl Hash for Email {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.expose_secret().hash(state);
    }
}
