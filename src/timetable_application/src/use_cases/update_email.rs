use std::sync::Arc;

use timetable_core::{
    ApprovalCode, ApprovalCodeStore, ApprovalPurpose, Email, ServiceResult, UserId, UserStore,
    UserStoreError,
};

use super::approval::ApprovalService;
use crate::{error::AccountError, messages::Messages};

/// Update email use case - replaces the account email after an update-email code checks out
pub struct UpdateEmailUseCase<U, A>
where
    U: UserStore,
    A: ApprovalCodeStore,
{
    user_store: U,
    approval: ApprovalService<A>,
    messages: Arc<Messages>,
}

impl<U, A> UpdateEmailUseCase<U, A>
where
    U: UserStore,
    A: ApprovalCodeStore,
{
    pub fn new(user_store: U, approval: ApprovalService<A>, messages: Arc<Messages>) -> Self {
        Self {
            user_store,
            approval,
            messages,
        }
    }

    /// # Errors
    /// `AccountError::IntegrityViolation` when the stored user fails re-validation.
    #[tracing::instrument(name = "UpdateEmailUseCase::execute", skip(self, new_email, approval_code))]
    pub async fn execute(
        &self,
        user_id: UserId,
        new_email: &str,
        approval_code: ApprovalCode,
    ) -> Result<ServiceResult, AccountError> {
        if user_id.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.user_id_unset));
        }
        let Ok(new_email) = Email::parse(new_email) else {
            return Ok(ServiceResult::fail(&self.messages.invalid_email));
        };
        if approval_code.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.approval_code_invalid));
        }

        let mut user = match self.user_store.get_user_by_id(user_id).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                return Ok(ServiceResult::fail(&self.messages.user_not_found));
            }
            Err(e) => return Err(e.into()),
        };

        if user.email() != &new_email {
            if self.user_store.email_exists(&new_email, true).await? {
                return Ok(ServiceResult::fail(&self.messages.email_taken_confirmed));
            }
            if self.user_store.email_exists(&new_email, false).await? {
                return Ok(ServiceResult::fail(&self.messages.email_taken_unconfirmed));
            }
        }

        let approval = self
            .approval
            .verify_and_revoke(user_id, approval_code, ApprovalPurpose::UpdateEmail)
            .await?;
        if !approval.success {
            return Ok(ServiceResult::fail_with_approval(
                &self.messages.update_email_code_rejected,
                approval,
            ));
        }

        user.revalidate()
            .map_err(|e| AccountError::IntegrityViolation(e.to_string()))?;

        user.set_email(new_email);
        match self.user_store.update_user(&user).await {
            Ok(()) => {}
            // Lost a race against a concurrent registration of the same address.
            Err(UserStoreError::UserAlreadyExists) => {
                return Ok(ServiceResult::fail(&self.messages.email_taken_confirmed));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(%user_id, "User email updated");
        Ok(ServiceResult::ok(&self.messages.email_updated))
    }
}
