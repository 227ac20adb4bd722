use std::sync::Arc;

use chrono::Utc;
use redis::{Commands, Connection};
use timetable_core::{
    ApprovalCode, ApprovalCodeRecord, ApprovalCodeStore, ApprovalCodeStoreError, ApprovalPurpose,
    UserId,
};
use tokio::sync::RwLock;

/// Approval codes kept in Redis. Keys expire together with the code they hold.
#[derive(Clone)]
pub struct RedisApprovalCodeStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisApprovalCodeStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl ApprovalCodeStore for RedisApprovalCodeStore {
    #[tracing::instrument(name = "Storing approval code in Redis", skip_all)]
    async fn store_code(&self, record: ApprovalCodeRecord) -> Result<(), ApprovalCodeStoreError> {
        let key = get_key(record.user_id, record.purpose);
        let mut conn = self.conn.write().await;
        write_record(&mut conn, &key, &record)
    }

    #[tracing::instrument(name = "Retrieving approval code from Redis", skip(self))]
    async fn get_code(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
    ) -> Result<ApprovalCodeRecord, ApprovalCodeStoreError> {
        let key = get_key(user_id, purpose);
        let mut conn = self.conn.write().await;
        read_record(&mut conn, &key)?.ok_or(ApprovalCodeStoreError::CodeNotFound)
    }

    #[tracing::instrument(name = "Revoking approval code in Redis", skip(self, code))]
    async fn revoke(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
        code: ApprovalCode,
    ) -> Result<bool, ApprovalCodeStoreError> {
        let key = get_key(user_id, purpose);
        // Read and write happen under one lock on the shared connection.
        let mut conn = self.conn.write().await;
        let Some(mut record) = read_record(&mut conn, &key)? else {
            return Ok(false);
        };
        if record.code != code || record.revoked {
            return Ok(false);
        }

        record.revoked = true;
        write_record(&mut conn, &key, &record)?;
        Ok(true)
    }
}

fn read_record(
    conn: &mut Connection,
    key: &str,
) -> Result<Option<ApprovalCodeRecord>, ApprovalCodeStoreError> {
    let raw: Option<String> = conn
        .get(key)
        .map_err(|e| ApprovalCodeStoreError::UnexpectedError(e.to_string()))?;

    raw.map(|raw| {
        serde_json::from_str(&raw)
            .map_err(|e| ApprovalCodeStoreError::UnexpectedError(e.to_string()))
    })
    .transpose()
}

fn write_record(
    conn: &mut Connection,
    key: &str,
    record: &ApprovalCodeRecord,
) -> Result<(), ApprovalCodeStoreError> {
    let value = serde_json::to_string(record)
        .map_err(|e| ApprovalCodeStoreError::UnexpectedError(e.to_string()))?;
    // Redis rejects a zero TTL; an already expired record lives one more second.
    let ttl = (record.expires_at - Utc::now()).num_seconds().max(1) as u64;

    let _: () = conn
        .set_ex(key, value, ttl)
        .map_err(|e| ApprovalCodeStoreError::UnexpectedError(e.to_string()))?;
    Ok(())
}

const APPROVAL_CODE_KEY_PREFIX: &str = "approval_code:";

fn get_key(user_id: UserId, purpose: ApprovalPurpose) -> String {
    format!("{}{}:{}", APPROVAL_CODE_KEY_PREFIX, user_id, purpose.as_str())
}
