use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    approval_code::ApprovalPurpose,
    email::Email,
    password::{Password, PasswordHash},
    service_result::ServiceResult,
    user::UserId,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EmailClientError {
    #[error("Email client misconfigured: {0}")]
    InvalidConfig(String),
    #[error("Email request failed: {0}")]
    Transport(String),
    #[error("Email rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), EmailClientError>;
}

#[derive(Debug, Error)]
pub enum HashingError {
    #[error("Failed to hash password: {0}")]
    HashError(String),
    #[error("Failed to verify password: {0}")]
    VerifyError(String),
}

/// Port trait for the one-way password hash.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, HashingError>;
    /// `Ok(false)` when the candidate does not match.
    async fn verify(&self, hash: &PasswordHash, candidate: &Password) -> Result<bool, HashingError>;
}

/// Port trait delivering approval codes to their owner out of band.
///
/// Delivery failures are reported in the result, never retried.
#[async_trait]
pub trait ApprovalSender: Send + Sync {
    async fn send_registration_code(&self, email: &Email) -> ServiceResult;
    async fn send_approval_code(&self, user_id: UserId, purpose: ApprovalPurpose) -> ServiceResult;
}
