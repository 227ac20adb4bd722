use sqlx::{PgPool, Row};
use timetable_core::{GroupId, GroupStore, GroupStoreError};

#[derive(Clone)]
pub struct PostgresGroupStore {
    pool: PgPool,
}

impl PostgresGroupStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GroupStore for PostgresGroupStore {
    #[tracing::instrument(name = "Checking student group in PostgreSQL", skip(self))]
    async fn group_exists(&self, id: GroupId) -> Result<bool, GroupStoreError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM student_groups WHERE id = $1) AS found")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| GroupStoreError::UnexpectedError(e.to_string()))?;

        row.try_get("found")
            .map_err(|e| GroupStoreError::UnexpectedError(e.to_string()))
    }
}
