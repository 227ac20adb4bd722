use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};
use timetable_core::{Email, NewUser, User, UserId, UserStore, UserStoreError};

const USER_COLUMNS: &str = "id, email, password_hash, is_email_confirmed, role, student_group_id";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, user: NewUser) -> Result<UserId, UserStoreError> {
        let row = sqlx::query(
            r#"
                INSERT INTO users (email, password_hash, is_email_confirmed, role, student_group_id)
                VALUES ($1, $2, FALSE, $3, $4)
                RETURNING id
            "#,
        )
        .bind(user.email.as_ref().expose_secret())
        .bind(user.password_hash.as_ref().expose_secret())
        .bind(user.role.role().code())
        .bind(user.role.group_id().map(|id| id.value()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        let id: i32 = row
            .try_get("id")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        Ok(UserId::new(id))
    }

    #[tracing::instrument(name = "Checking email in PostgreSQL", skip_all)]
    async fn email_exists(&self, email: &Email, confirmed: bool) -> Result<bool, UserStoreError> {
        let row = sqlx::query(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM users WHERE email = $1 AND is_email_confirmed = $2
                ) AS found
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .bind(confirmed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.try_get("found")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Checking user in PostgreSQL", skip(self))]
    async fn user_exists(&self, id: UserId) -> Result<bool, UserStoreError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1) AS found")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.try_get("found")
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query(&query)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        parse_user(&row)
    }

    #[tracing::instrument(name = "Retrieving user by id from PostgreSQL", skip(self))]
    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(UserStoreError::UserNotFound);
        };
        parse_user(&row)
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update_user(&self, user: &User) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET email = $1, password_hash = $2, is_email_confirmed = $3,
                    role = $4, student_group_id = $5
                WHERE id = $6
            "#,
        )
        .bind(user.email().as_ref().expose_secret())
        .bind(user.password_hash().as_ref().expose_secret())
        .bind(user.is_email_confirmed())
        .bind(user.role().role().code())
        .bind(user.role().group_id().map(|id| id.value()))
        .bind(user.id().value())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Delete user from user store", skip(self))]
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }
}

fn map_write_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return UserStoreError::UserAlreadyExists;
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}

fn parse_user(row: &PgRow) -> Result<User, UserStoreError> {
    let column_error = |e: sqlx::Error| UserStoreError::UnexpectedError(e.to_string());

    User::parse(
        row.try_get("id").map_err(column_error)?,
        Secret::from(row.try_get::<String, _>("email").map_err(column_error)?),
        Secret::from(row.try_get::<String, _>("password_hash").map_err(column_error)?),
        row.try_get("is_email_confirmed").map_err(column_error)?,
        row.try_get("role").map_err(column_error)?,
        row.try_get("student_group_id").map_err(column_error)?,
    )
    .map_err(|e| UserStoreError::CorruptRecord(e.to_string()))
}
