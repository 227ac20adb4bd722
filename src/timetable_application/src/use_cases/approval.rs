use std::sync::Arc;

use chrono::{Duration, Utc};
use timetable_core::{
    ApprovalCode, ApprovalCodeRecord, ApprovalCodeStore, ApprovalCodeStoreError, ApprovalPurpose,
    ServiceResult, UserId,
};

use crate::{error::AccountError, messages::Messages};

/// Default lifetime of an approval code.
pub const DEFAULT_APPROVAL_CODE_TTL_SECS: i64 = 600;

/// Issues and checks purpose-scoped one-time approval codes.
#[derive(Clone)]
pub struct ApprovalService<A>
where
    A: ApprovalCodeStore,
{
    store: A,
    code_ttl: Duration,
    messages: Arc<Messages>,
}

impl<A> ApprovalService<A>
where
    A: ApprovalCodeStore,
{
    pub fn new(store: A, code_ttl: Duration, messages: Arc<Messages>) -> Self {
        Self {
            store,
            code_ttl,
            messages,
        }
    }

    /// Generates a fresh code for `(user_id, purpose)`, replacing any earlier one,
    /// and returns it for delivery.
    #[tracing::instrument(name = "ApprovalService::issue", skip(self))]
    pub async fn issue(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
    ) -> Result<ApprovalCode, AccountError> {
        let code = ApprovalCode::generate();
        let record = ApprovalCodeRecord::new(user_id, purpose, code, Utc::now(), self.code_ttl);
        self.store.store_code(record).await?;

        tracing::info!(%user_id, %purpose, "Approval code issued");
        Ok(code)
    }

    /// Checks `code` against the live code of `(user_id, purpose)` without consuming it.
    #[tracing::instrument(name = "ApprovalService::verify", skip(self, code))]
    pub async fn verify(
        &self,
        user_id: UserId,
        code: ApprovalCode,
        purpose: ApprovalPurpose,
    ) -> Result<ServiceResult, AccountError> {
        if code.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.approval_code_unset));
        }

        let record = match self.store.get_code(user_id, purpose).await {
            Ok(record) => record,
            Err(ApprovalCodeStoreError::CodeNotFound) => {
                return Ok(self.reject(user_id, purpose, &self.messages.approval_code_not_found));
            }
            Err(e) => return Err(e.into()),
        };

        if record.code != code {
            return Ok(self.reject(user_id, purpose, &self.messages.approval_code_mismatch));
        }
        if record.revoked {
            return Ok(self.reject(user_id, purpose, &self.messages.approval_code_revoked));
        }
        if record.is_expired_at(Utc::now()) {
            return Ok(self.reject(user_id, purpose, &self.messages.approval_code_expired));
        }

        Ok(ServiceResult::ok(&self.messages.approval_code_accepted))
    }

    /// Same as [`Self::verify`], and consumes the code on success so it cannot be replayed.
    #[tracing::instrument(name = "ApprovalService::verify_and_revoke", skip(self, code))]
    pub async fn verify_and_revoke(
        &self,
        user_id: UserId,
        code: ApprovalCode,
        purpose: ApprovalPurpose,
    ) -> Result<ServiceResult, AccountError> {
        let result = self.verify(user_id, code, purpose).await?;
        if !result.success {
            return Ok(result);
        }

        // Lost a race against another request presenting the same code.
        if !self.store.revoke(user_id, purpose, code).await? {
            return Ok(self.reject(user_id, purpose, &self.messages.approval_code_revoked));
        }

        tracing::info!(%user_id, %purpose, "Approval code consumed");
        Ok(result)
    }

    fn reject(&self, user_id: UserId, purpose: ApprovalPurpose, description: &str) -> ServiceResult {
        tracing::warn!(%user_id, %purpose, reason = description, "Approval code rejected");
        ServiceResult::fail(description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApprovalCodeStore;

    fn service(store: MockApprovalCodeStore) -> ApprovalService<MockApprovalCodeStore> {
        ApprovalService::new(
            store,
            Duration::seconds(DEFAULT_APPROVAL_CODE_TTL_SECS),
            Arc::new(Messages::default()),
        )
    }

    #[tokio::test]
    async fn issued_code_verifies() {
        let store = MockApprovalCodeStore::default();
        let service = service(store.clone());
        let user_id = UserId::new(1);

        let code = service
            .issue(user_id, ApprovalPurpose::Registration)
            .await
            .unwrap();
        let result = service
            .verify(user_id, code, ApprovalPurpose::Registration)
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(store.code_for(user_id, ApprovalPurpose::Registration).await, code);
    }

    #[tokio::test]
    async fn verify_and_revoke_is_single_use() {
        let service = service(MockApprovalCodeStore::default());
        let user_id = UserId::new(1);
        let code = service
            .issue(user_id, ApprovalPurpose::UpdatePassword)
            .await
            .unwrap();

        let first = service
            .verify_and_revoke(user_id, code, ApprovalPurpose::UpdatePassword)
            .await
            .unwrap();
        let second = service
            .verify_and_revoke(user_id, code, ApprovalPurpose::UpdatePassword)
            .await
            .unwrap();

        assert!(first.success);
        assert!(!second.success);
        assert_eq!(second.description, Messages::default().approval_code_revoked);
    }

    #[tokio::test]
    async fn plain_verify_does_not_consume() {
        let service = service(MockApprovalCodeStore::default());
        let user_id = UserId::new(1);
        let code = service
            .issue(user_id, ApprovalPurpose::UpdateEmail)
            .await
            .unwrap();

        for _ in 0..2 {
            let result = service
                .verify(user_id, code, ApprovalPurpose::UpdateEmail)
                .await
                .unwrap();
            assert!(result.success);
        }
    }

    #[tokio::test]
    async fn zero_code_is_rejected() {
        let service = service(MockApprovalCodeStore::default());
        let result = service
            .verify(UserId::new(1), ApprovalCode::new(0), ApprovalPurpose::Registration)
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.description, Messages::default().approval_code_unset);
    }

    #[tokio::test]
    async fn code_is_bound_to_purpose_and_user() {
        let service = service(MockApprovalCodeStore::default());
        let user_id = UserId::new(1);
        let code = service
            .issue(user_id, ApprovalPurpose::Registration)
            .await
            .unwrap();

        let other_purpose = service
            .verify(user_id, code, ApprovalPurpose::Unregistration)
            .await
            .unwrap();
        let other_user = service
            .verify(UserId::new(2), code, ApprovalPurpose::Registration)
            .await
            .unwrap();

        assert!(!other_purpose.success);
        assert!(!other_user.success);
        assert_eq!(other_user.description, Messages::default().approval_code_not_found);
    }

    #[tokio::test]
    async fn wrong_code_is_rejected() {
        let store = MockApprovalCodeStore::default();
        let service = service(store);
        let user_id = UserId::new(1);
        let code = service
            .issue(user_id, ApprovalPurpose::Registration)
            .await
            .unwrap();
        let wrong = ApprovalCode::new(if code.value() == 999_999 { 100_000 } else { code.value() + 1 });

        let result = service
            .verify(user_id, wrong, ApprovalPurpose::Registration)
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.description, Messages::default().approval_code_mismatch);
    }

    #[tokio::test]
    async fn expired_code_is_rejected() {
        let store = MockApprovalCodeStore::default();
        let user_id = UserId::new(1);
        let code = ApprovalCode::new(123_456);
        store
            .store_code(ApprovalCodeRecord::new(
                user_id,
                ApprovalPurpose::Registration,
                code,
                Utc::now() - Duration::hours(1),
                Duration::minutes(10),
            ))
            .await
            .unwrap();

        let result = service(store)
            .verify_and_revoke(user_id, code, ApprovalPurpose::Registration)
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.description, Messages::default().approval_code_expired);
    }

    #[tokio::test]
    async fn reissuing_replaces_previous_code() {
        let service = service(MockApprovalCodeStore::default());
        let user_id = UserId::new(1);
        let first = service
            .issue(user_id, ApprovalPurpose::Registration)
            .await
            .unwrap();
        let second = service
            .issue(user_id, ApprovalPurpose::Registration)
            .await
            .unwrap();

        let result = service
            .verify(user_id, second, ApprovalPurpose::Registration)
            .await
            .unwrap();
        assert!(result.success);

        if first != second {
            let stale = service
                .verify(user_id, first, ApprovalPurpose::Registration)
                .await
                .unwrap();
            assert!(!stale.success);
        }
    }
}
