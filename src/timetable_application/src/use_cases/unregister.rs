use std::sync::Arc;

use timetable_core::{
    ApprovalCode, ApprovalCodeStore, ApprovalPurpose, ServiceResult, UserId, UserStore,
};

use super::approval::ApprovalService;
use crate::{error::AccountError, messages::Messages};

/// Unregister use case - deletes an account after an unregistration code checks out
pub struct UnregisterUseCase<U, A>
where
    U: UserStore,
    A: ApprovalCodeStore,
{
    user_store: U,
    approval: ApprovalService<A>,
    messages: Arc<Messages>,
}

impl<U, A> UnregisterUseCase<U, A>
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

    #[tracing::instrument(name = "UnregisterUseCase::execute", skip(self, approval_code))]
    pub async fn execute(
        &self,
        user_id: UserId,
        approval_code: ApprovalCode,
    ) -> Result<ServiceResult, AccountError> {
        if user_id.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.user_id_unset));
        }
        if !self.user_store.user_exists(user_id).await? {
            return Ok(ServiceResult::fail(&self.messages.user_not_found));
        }

        let approval = self
            .approval
            .verify_and_revoke(user_id, approval_code, ApprovalPurpose::Unregistration)
            .await?;
        if !approval.success {
            return Ok(ServiceResult::fail_with_approval(
                &self.messages.unregistration_code_rejected,
                approval,
            ));
        }

        self.user_store.delete_user(user_id).await?;

        tracing::info!(%user_id, "User unregistered");
        Ok(ServiceResult::ok(&self.messages.user_deleted))
    }
}
