use timetable_core::{
    ApprovalCodeStoreError, GroupStoreError, HashingError, RegistrationCodeStoreError,
    UserStoreError,
};

/// Operational failures of the account workflows.
///
/// Expected business failures never end up here; they are reported as a
/// failed [`timetable_core::ServiceResult`].
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Approval code store error: {0}")]
    ApprovalCodeStoreError(#[from] ApprovalCodeStoreError),
    #[error("Registration code store error: {0}")]
    RegistrationCodeStoreError(#[from] RegistrationCodeStoreError),
    #[error("Group store error: {0}")]
    GroupStoreError(#[from] GroupStoreError),
    #[error("Hashing error: {0}")]
    HashingError(#[from] HashingError),
    #[error("Stored data violates an invariant: {0}")]
    IntegrityViolation(String),
}

impl From<UserStoreError> for AccountError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::CorruptRecord(details) => Self::IntegrityViolation(details),
            other => Self::UserStoreError(other),
        }
    }
}
