use std::sync::Arc;

use timetable_core::{ApprovalPurpose, ApprovalSender, ServiceResult, UserId, UserStore};

use crate::{error::AccountError, messages::Messages};

/// Request approval code use case - asks the sender to deliver a code for an account change
pub struct RequestApprovalCodeUseCase<U, S>
where
    U: UserStore,
    S: ApprovalSender,
{
    user_store: U,
    sender: S,
    messages: Arc<Messages>,
}

impl<U, S> RequestApprovalCodeUseCase<U, S>
where
    U: UserStore,
    S: ApprovalSender,
{
    pub fn new(user_store: U, sender: S, messages: Arc<Messages>) -> Self {
        Self {
            user_store,
            sender,
            messages,
        }
    }

    #[tracing::instrument(name = "RequestApprovalCodeUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
    ) -> Result<ServiceResult, AccountError> {
        if user_id.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.user_id_unset));
        }
        if !self.user_store.user_exists(user_id).await? {
            return Ok(ServiceResult::fail(&self.messages.user_not_found));
        }

        Ok(self.sender.send_approval_code(user_id, purpose).await)
    }
}
