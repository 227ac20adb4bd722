use std::time::Duration;

use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;
use timetable_application::{DEFAULT_APPROVAL_CODE_TTL_SECS, Messages};

use super::constants::{self, env, prod};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub postgres: PostgresSettings,
    pub redis: RedisSettings,
    pub email_client: EmailClientSettings,
    pub approval: ApprovalSettings,
    #[serde(default)]
    pub messages: Messages,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
    pub message_stream: String,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalSettings {
    pub code_ttl_secs: i64,
}

impl ApprovalSettings {
    pub fn code_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.code_ttl_secs)
    }
}

impl Settings {
    /// Loads `config/base.json`, then `config/{APP_ENVIRONMENT}.json`, then
    /// `APP_*` environment variables. Both files are optional.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| constants::DEFAULT_ENVIRONMENT.to_string());

        let builder = with_defaults(Config::builder())?
            .add_source(File::with_name(&format!("{}/base", constants::CONFIG_DIR)).required(false))
            .add_source(
                File::with_name(&format!("{}/{}", constants::CONFIG_DIR, environment))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(constants::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(constants::ENV_SEPARATOR),
            );

        builder.build()?.try_deserialize()
    }

    /// Builds settings from a JSON document on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        with_defaults(Config::builder())?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("redis.host_name", prod::REDIS_HOST_NAME)?
        .set_default("email_client.base_url", prod::email_client::BASE_URL)?
        .set_default("email_client.timeout_in_millis", prod::email_client::TIMEOUT_IN_MILLIS)?
        .set_default("email_client.message_stream", prod::email_client::MESSAGE_STREAM)?
        .set_default("approval.code_ttl_secs", DEFAULT_APPROVAL_CODE_TTL_SECS)
}
