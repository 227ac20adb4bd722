mod account_service;
pub mod helpers;
pub mod telemetry;

pub use account_service::AccountService;
pub use helpers::{
    ProductionAccountService, build_account_service, configure_email_client,
    configure_postgresql, configure_redis, get_postgres_pool, get_redis_client,
};
pub use telemetry::init_tracing;
