use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use redis::{Client, RedisResult};
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use timetable_adapters::{
    Argon2Hasher, PostgresGroupStore, PostgresRegistrationCodeStore, PostgresUserStore,
    PostmarkEmailClient, RedisApprovalCodeStore, Settings,
};
use tokio::sync::RwLock;

use crate::AccountService;

/// Account service backed by PostgreSQL, Redis, Argon2 and Postmark.
pub type ProductionAccountService = AccountService<
    PostgresUserStore,
    RedisApprovalCodeStore,
    PostgresRegistrationCodeStore,
    PostgresGroupStore,
    Argon2Hasher,
    PostmarkEmailClient,
>;

/// Build the production account service from loaded settings
///
/// Connects to PostgreSQL and Redis and prepares the Postmark client.
/// The database schema is expected to exist already.
pub async fn build_account_service(settings: &Settings) -> Result<ProductionAccountService> {
    let pg_pool = configure_postgresql(settings).await?;
    let redis_conn = Arc::new(RwLock::new(configure_redis(settings)?));
    let email_client = configure_email_client(settings)?;

    tracing::info!("Account service backends ready");

    Ok(AccountService::new(
        PostgresUserStore::new(pg_pool.clone()),
        RedisApprovalCodeStore::new(redis_conn),
        PostgresRegistrationCodeStore::new(pg_pool.clone()),
        PostgresGroupStore::new(pg_pool),
        Argon2Hasher::new(),
        email_client,
        settings.approval.code_ttl(),
        settings.messages.clone(),
    ))
}

/// Configure and return a PostgreSQL connection pool
pub async fn configure_postgresql(settings: &Settings) -> Result<PgPool> {
    get_postgres_pool(settings.postgres.url.expose_secret())
        .await
        .wrap_err("Failed to create Postgres connection pool")
}

/// Configure and return a Redis connection
pub fn configure_redis(settings: &Settings) -> Result<redis::Connection> {
    get_redis_client(&settings.redis.host_name)
        .wrap_err("Failed to get Redis client")?
        .get_connection()
        .wrap_err("Failed to get Redis connection")
}

/// Configure the Postmark client from the `email_client` settings
pub fn configure_email_client(settings: &Settings) -> Result<PostmarkEmailClient> {
    PostmarkEmailClient::from_settings(&settings.email_client)
        .wrap_err("Failed to configure Postmark client")
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
pub async fn get_postgres_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect(url).await
}

/// Create a Redis client
///
/// # Arguments
/// * `redis_hostname` - Redis server hostname
pub fn get_redis_client(redis_hostname: &str) -> RedisResult<Client> {
    let redis_url = format!("redis://{}/", redis_hostname);
    redis::Client::open(redis_url)
}
