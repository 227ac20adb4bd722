use std::sync::Arc;

use timetable_application::{AccountError, ApprovalService, Messages};
use timetable_core::{
    ApprovalCodeStore, ApprovalPurpose, ApprovalSender, Email, EmailClient, ServiceResult, User,
    UserId, UserStore, UserStoreError,
};

/// Delivers approval codes by email to the address stored for the user.
pub struct EmailApprovalSender<U, A, E>
where
    U: UserStore,
    A: ApprovalCodeStore,
    E: EmailClient,
{
    user_store: U,
    approval: ApprovalService<A>,
    email_client: Arc<E>,
    messages: Arc<Messages>,
}

impl<U, A, E> Clone for EmailApprovalSender<U, A, E>
where
    U: UserStore + Clone,
    A: ApprovalCodeStore + Clone,
    E: EmailClient,
{
    fn clone(&self) -> Self {
        Self {
            user_store: self.user_store.clone(),
            approval: self.approval.clone(),
            email_client: self.email_client.clone(),
            messages: self.messages.clone(),
        }
    }
}

impl<U, A, E> EmailApprovalSender<U, A, E>
where
    U: UserStore,
    A: ApprovalCodeStore,
    E: EmailClient,
{
    pub fn new(
        user_store: U,
        approval: ApprovalService<A>,
        email_client: Arc<E>,
        messages: Arc<Messages>,
    ) -> Self {
        Self {
            user_store,
            approval,
            email_client,
            messages,
        }
    }

    async fn deliver(&self, user: &User, purpose: ApprovalPurpose) -> ServiceResult {
        let code = match self.approval.issue(user.id(), purpose).await {
            Ok(code) => code,
            Err(e) => return self.not_sent(user.id(), purpose, &e),
        };

        let body = self.messages.approval_email_body(code);
        if let Err(e) = self
            .email_client
            .send_email(user.email(), &self.messages.approval_email_subject, &body)
            .await
        {
            tracing::error!(user_id = %user.id(), %purpose, error = %e, "Approval email failed");
            return ServiceResult::fail(&self.messages.approval_code_not_sent);
        }

        tracing::info!(user_id = %user.id(), %purpose, "Approval code sent");
        ServiceResult::ok(&self.messages.approval_code_sent)
    }

    fn not_sent(&self, user_id: UserId, purpose: ApprovalPurpose, e: &AccountError) -> ServiceResult {
        tracing::error!(%user_id, %purpose, error = %e, "Approval code not issued");
        ServiceResult::fail(&self.messages.approval_code_not_sent)
    }
}

#[async_trait::async_trait]
impl<U, A, E> ApprovalSender for EmailApprovalSender<U, A, E>
where
    U: UserStore,
    A: ApprovalCodeStore,
    E: EmailClient,
{
    #[tracing::instrument(name = "EmailApprovalSender::send_registration_code", skip_all)]
    async fn send_registration_code(&self, email: &Email) -> ServiceResult {
        let user = match self.user_store.get_user_by_email(email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                return ServiceResult::fail(&self.messages.user_not_found);
            }
            Err(e) => {
                tracing::error!(error = %e, "User lookup failed");
                return ServiceResult::fail(&self.messages.approval_code_not_sent);
            }
        };
        if user.is_email_confirmed() {
            return ServiceResult::fail(&self.messages.email_already_confirmed);
        }

        self.deliver(&user, ApprovalPurpose::Registration).await
    }

    #[tracing::instrument(name = "EmailApprovalSender::send_approval_code", skip(self))]
    async fn send_approval_code(&self, user_id: UserId, purpose: ApprovalPurpose) -> ServiceResult {
        let user = match self.user_store.get_user_by_id(user_id).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                return ServiceResult::fail(&self.messages.user_not_found);
            }
            Err(e) => return self.not_sent(user_id, purpose, &e.into()),
        };

        self.deliver(&user, purpose).await
    }
}
