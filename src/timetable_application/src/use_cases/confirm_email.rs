use std::sync::Arc;

use timetable_core::{
    ApprovalCode, ApprovalCodeStore, ApprovalPurpose, Email, ServiceResult, UserStore,
    UserStoreError,
};

use super::approval::ApprovalService;
use crate::{error::AccountError, messages::Messages};

/// Confirm email use case - marks the email as confirmed once the registration code checks out
pub struct ConfirmEmailUseCase<U, A>
where
    U: UserStore,
    A: ApprovalCodeStore,
{
    user_store: U,
    approval: ApprovalService<A>,
    messages: Arc<Messages>,
}

impl<U, A> ConfirmEmailUseCase<U, A>
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

    #[tracing::instrument(name = "ConfirmEmailUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: &str,
        approval_code: ApprovalCode,
    ) -> Result<ServiceResult, AccountError> {
        if approval_code.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.approval_code_invalid));
        }
        let Ok(email) = Email::parse(email) else {
            return Ok(ServiceResult::fail(&self.messages.malformed_email));
        };

        let mut user = match self.user_store.get_user_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                return Ok(ServiceResult::fail(&self.messages.confirmation_user_not_found));
            }
            Err(e) => return Err(e.into()),
        };

        let approval = self
            .approval
            .verify_and_revoke(user.id(), approval_code, ApprovalPurpose::Registration)
            .await?;
        if !approval.success {
            return Ok(ServiceResult::fail_with_approval(
                &self.messages.registration_code_rejected,
                approval,
            ));
        }

        user.confirm_email();
        self.user_store.update_user(&user).await?;

        tracing::info!(user_id = %user.id(), "Email confirmed");
        Ok(ServiceResult::ok(&self.messages.email_confirmed))
    }
}
