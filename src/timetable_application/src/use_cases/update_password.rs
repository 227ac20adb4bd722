use std::sync::Arc;

use secrecy::Secret;
use timetable_core::{
    ApprovalCode, ApprovalCodeStore, ApprovalPurpose, Password, PasswordHasher, ServiceResult,
    UserId, UserStore, UserStoreError,
};

use super::approval::ApprovalService;
use crate::{error::AccountError, messages::Messages};

/// Update password use case - re-hashes the password after an update-password code checks out
pub struct UpdatePasswordUseCase<U, A, H>
where
    U: UserStore,
    A: ApprovalCodeStore,
    H: PasswordHasher,
{
    user_store: U,
    approval: ApprovalService<A>,
    hasher: H,
    messages: Arc<Messages>,
}

impl<U, A, H> UpdatePasswordUseCase<U, A, H>
where
    U: UserStore,
    A: ApprovalCodeStore,
    H: PasswordHasher,
{
    pub fn new(
        user_store: U,
        approval: ApprovalService<A>,
        hasher: H,
        messages: Arc<Messages>,
    ) -> Self {
        Self {
            user_store,
            approval,
            hasher,
            messages,
        }
    }

    /// The approval code is checked before the user is loaded.
    ///
    /// # Errors
    /// `AccountError::IntegrityViolation` when the stored user fails re-validation.
    #[tracing::instrument(
        name = "UpdatePasswordUseCase::execute",
        skip(self, new_password, approval_code)
    )]
    pub async fn execute(
        &self,
        user_id: UserId,
        new_password: Secret<String>,
        approval_code: ApprovalCode,
    ) -> Result<ServiceResult, AccountError> {
        if user_id.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.user_id_unset));
        }
        if approval_code.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.approval_code_invalid));
        }
        let Ok(new_password) = Password::try_from(new_password) else {
            return Ok(ServiceResult::fail(&self.messages.weak_password));
        };

        let approval = self
            .approval
            .verify_and_revoke(user_id, approval_code, ApprovalPurpose::UpdatePassword)
            .await?;
        if !approval.success {
            return Ok(ServiceResult::fail_with_approval(
                &self.messages.update_password_code_rejected,
                approval,
            ));
        }

        let mut user = match self.user_store.get_user_by_id(user_id).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                return Ok(ServiceResult::fail(&self.messages.user_not_found));
            }
            Err(e) => return Err(e.into()),
        };
        user.revalidate()
            .map_err(|e| AccountError::IntegrityViolation(e.to_string()))?;

        let password_hash = self.hasher.hash(new_password).await?;
        user.set_password_hash(password_hash);
        self.user_store.update_user(&user).await?;

        tracing::info!(%user_id, "User password updated");
        Ok(ServiceResult::ok(&self.messages.password_updated))
    }
}
