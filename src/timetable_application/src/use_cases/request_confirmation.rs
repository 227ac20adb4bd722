use std::sync::Arc;

use timetable_core::{ApprovalSender, Email, ServiceResult};

use crate::{error::AccountError, messages::Messages};

/// Request confirmation email use case - asks the sender to deliver a registration code
pub struct RequestConfirmationEmailUseCase<S>
where
    S: ApprovalSender,
{
    sender: S,
    messages: Arc<Messages>,
}

impl<S> RequestConfirmationEmailUseCase<S>
where
    S: ApprovalSender,
{
    pub fn new(sender: S, messages: Arc<Messages>) -> Self {
        Self { sender, messages }
    }

    /// The user record is not touched; only the sender acts.
    #[tracing::instrument(name = "RequestConfirmationEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, email: &str) -> Result<ServiceResult, AccountError> {
        let Ok(email) = Email::parse(email) else {
            return Ok(ServiceResult::fail(&self.messages.malformed_email));
        };

        let sent = self.sender.send_registration_code(&email).await;
        if !sent.success {
            tracing::warn!(reason = %sent.description, "Confirmation email was not sent");
            return Ok(ServiceResult::fail(&self.messages.confirmation_email_not_sent));
        }

        Ok(ServiceResult::ok(sent.description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApprovalSender;

    #[tokio::test]
    async fn test_request_confirmation_delegates_to_sender() {
        let sender = MockApprovalSender::new(true);
        let use_case = RequestConfirmationEmailUseCase::new(sender.clone(), Arc::default());

        let result = use_case.execute("new@school.ru").await.unwrap();

        assert!(result.success);
        assert_eq!(result.description, "sent");
        let requests = sender.registration_requests.read().await;
        assert_eq!(requests.as_slice(), &[Email::parse("new@school.ru").unwrap()]);
    }

    #[tokio::test]
    async fn test_request_confirmation_reports_sender_failure() {
        let use_case =
            RequestConfirmationEmailUseCase::new(MockApprovalSender::new(false), Arc::default());

        let result = use_case.execute("new@school.ru").await.unwrap();

        assert!(!result.success);
        assert_eq!(result.description, Messages::default().confirmation_email_not_sent);
    }

    #[tokio::test]
    async fn test_request_confirmation_invalid_email() {
        let sender = MockApprovalSender::new(true);
        let use_case = RequestConfirmationEmailUseCase::new(sender.clone(), Arc::default());

        let result = use_case.execute("nope").await.unwrap();

        assert!(!result.success);
        assert_eq!(result.description, Messages::default().malformed_email);
        assert!(sender.registration_requests.read().await.is_empty());
    }
}
