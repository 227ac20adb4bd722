use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    approval_code::{ApprovalCode, ApprovalCodeRecord, ApprovalPurpose},
    email::Email,
    group::GroupId,
    registration_code::RegistrationCode,
    user::{NewUser, User, UserId},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Stored user is invalid: {0}")]
    CorruptRecord(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::CorruptRecord(_), Self::CorruptRecord(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts an unconfirmed user and returns its new id.
    async fn add_user(&self, user: NewUser) -> Result<UserId, UserStoreError>;
    /// Whether a user with `email` and the given confirmation state exists.
    async fn email_exists(&self, email: &Email, confirmed: bool) -> Result<bool, UserStoreError>;
    async fn user_exists(&self, id: UserId) -> Result<bool, UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserStoreError>;
    async fn update_user(&self, user: &User) -> Result<(), UserStoreError>;
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError>;
}

// ApprovalCodeStore port trait and errors
#[derive(Debug, Error)]
pub enum ApprovalCodeStoreError {
    #[error("Approval code not found")]
    CodeNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ApprovalCodeStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::CodeNotFound, Self::CodeNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait ApprovalCodeStore: Send + Sync {
    /// Stores `record`, replacing any code issued earlier for the same user and purpose.
    async fn store_code(&self, record: ApprovalCodeRecord) -> Result<(), ApprovalCodeStoreError>;
    async fn get_code(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
    ) -> Result<ApprovalCodeRecord, ApprovalCodeStoreError>;
    /// Marks the code as used. Returns `false` when no live code matched,
    /// so two concurrent revocations can never both succeed.
    async fn revoke(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
        code: ApprovalCode,
    ) -> Result<bool, ApprovalCodeStoreError>;
}

// RegistrationCodeStore port trait and errors
#[derive(Debug, Error)]
pub enum RegistrationCodeStoreError {
    #[error("Registration code already exists")]
    DuplicateKey,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait RegistrationCodeStore: Send + Sync {
    /// Persists all codes in one write.
    async fn add_codes(&self, codes: Vec<RegistrationCode>)
    -> Result<(), RegistrationCodeStoreError>;
}

// GroupStore port trait and errors
#[derive(Debug, Error)]
pub enum GroupStoreError {
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn group_exists(&self, id: GroupId) -> Result<bool, GroupStoreError>;
}
