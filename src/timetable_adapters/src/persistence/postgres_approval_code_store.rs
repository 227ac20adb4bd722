use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use timetable_core::{
    ApprovalCode, ApprovalCodeRecord, ApprovalCodeStore, ApprovalCodeStoreError, ApprovalPurpose,
    UserId,
};

#[derive(Clone)]
pub struct PostgresApprovalCodeStore {
    pool: PgPool,
}

impl PostgresApprovalCodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ApprovalCodeStore for PostgresApprovalCodeStore {
    #[tracing::instrument(name = "Storing approval code in PostgreSQL", skip_all)]
    async fn store_code(&self, record: ApprovalCodeRecord) -> Result<(), ApprovalCodeStoreError> {
        sqlx::query(
            r#"
                INSERT INTO approval_codes (user_id, purpose, code, expires_at, revoked)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (user_id, purpose)
                DO UPDATE SET code = EXCLUDED.code,
                              expires_at = EXCLUDED.expires_at,
                              revoked = EXCLUDED.revoked
            "#,
        )
        .bind(record.user_id.value())
        .bind(record.purpose.as_str())
        .bind(record.code.value() as i32)
        .bind(record.expires_at)
        .bind(record.revoked)
        .execute(&self.pool)
        .await
        .map_err(|e| ApprovalCodeStoreError::UnexpectedError(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving approval code from PostgreSQL", skip(self))]
    async fn get_code(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
    ) -> Result<ApprovalCodeRecord, ApprovalCodeStoreError> {
        let row = sqlx::query(
            r#"
                SELECT code, expires_at, revoked
                FROM approval_codes
                WHERE user_id = $1 AND purpose = $2
            "#,
        )
        .bind(user_id.value())
        .bind(purpose.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApprovalCodeStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(ApprovalCodeStoreError::CodeNotFound);
        };
        parse_record(user_id, purpose, &row)
    }

    #[tracing::instrument(name = "Revoking approval code in PostgreSQL", skip(self, code))]
    async fn revoke(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
        code: ApprovalCode,
    ) -> Result<bool, ApprovalCodeStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE approval_codes
                SET revoked = TRUE
                WHERE user_id = $1 AND purpose = $2 AND code = $3 AND revoked = FALSE
            "#,
        )
        .bind(user_id.value())
        .bind(purpose.as_str())
        .bind(code.value() as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| ApprovalCodeStoreError::UnexpectedError(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}

fn parse_record(
    user_id: UserId,
    purpose: ApprovalPurpose,
    row: &PgRow,
) -> Result<ApprovalCodeRecord, ApprovalCodeStoreError> {
    let column_error = |e: sqlx::Error| ApprovalCodeStoreError::UnexpectedError(e.to_string());

    let code: i32 = row.try_get("code").map_err(column_error)?;
    let code = u32::try_from(code)
        .map_err(|e| ApprovalCodeStoreError::UnexpectedError(e.to_string()))?;
    let expires_at: DateTime<Utc> = row.try_get("expires_at").map_err(column_error)?;

    Ok(ApprovalCodeRecord {
        user_id,
        purpose,
        code: ApprovalCode::new(code),
        expires_at,
        revoked: row.try_get("revoked").map_err(column_error)?,
    })
}
