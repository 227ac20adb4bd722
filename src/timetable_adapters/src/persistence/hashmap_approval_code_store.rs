use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use timetable_core::{
    ApprovalCode, ApprovalCodeRecord, ApprovalCodeStore, ApprovalCodeStoreError, ApprovalPurpose,
    UserId,
};

#[derive(Default, Clone)]
pub struct HashMapApprovalCodeStore {
    codes: Arc<RwLock<HashMap<(UserId, ApprovalPurpose), ApprovalCodeRecord>>>,
}

impl HashMapApprovalCodeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ApprovalCodeStore for HashMapApprovalCodeStore {
    async fn store_code(&self, record: ApprovalCodeRecord) -> Result<(), ApprovalCodeStoreError> {
        let mut codes = self.codes.write().await;
        codes.insert((record.user_id, record.purpose), record);
        Ok(())
    }

    async fn get_code(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
    ) -> Result<ApprovalCodeRecord, ApprovalCodeStoreError> {
        let codes = self.codes.read().await;
        codes
            .get(&(user_id, purpose))
            .cloned()
            .ok_or(ApprovalCodeStoreError::CodeNotFound)
    }

    async fn revoke(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
        code: ApprovalCode,
    ) -> Result<bool, ApprovalCodeStoreError> {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&(user_id, purpose)) {
            Some(record) if record.code == code && !record.revoked => {
                record.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
