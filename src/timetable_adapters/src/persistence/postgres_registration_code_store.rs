use secrecy::ExposeSecret;
use sqlx::{PgPool, Postgres, QueryBuilder};
use timetable_core::{RegistrationCode, RegistrationCodeStore, RegistrationCodeStoreError};

#[derive(Clone)]
pub struct PostgresRegistrationCodeStore {
    pool: PgPool,
}

impl PostgresRegistrationCodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RegistrationCodeStore for PostgresRegistrationCodeStore {
    #[tracing::instrument(name = "Adding registration codes to PostgreSQL", skip_all, fields(count = codes.len()))]
    async fn add_codes(
        &self,
        codes: Vec<RegistrationCode>,
    ) -> Result<(), RegistrationCodeStoreError> {
        if codes.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO registration_codes (secret_key, desired_role, student_group_id, expires_at) ",
        );
        builder.push_values(codes.iter(), |mut row, code| {
            row.push_bind(code.secret_key().expose_secret().clone())
                .push_bind(code.desired_role().code())
                .push_bind(code.student_group_id().map(|id| id.value()))
                .push_bind(code.expires_at());
        });

        builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return RegistrationCodeStoreError::DuplicateKey;
                    }
                }
                RegistrationCodeStoreError::UnexpectedError(e.to_string())
            })?;

        Ok(())
    }
}
