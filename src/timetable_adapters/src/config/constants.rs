pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
}

/// Prefix and nesting separator of environment overrides, e.g. `APP_REDIS__HOST_NAME`.
pub const ENV_PREFIX: &str = "APP";
pub const ENV_SEPARATOR: &str = "__";

pub const CONFIG_DIR: &str = "config";
pub const DEFAULT_ENVIRONMENT: &str = "local";

pub mod prod {
    pub const REDIS_HOST_NAME: &str = "127.0.0.1";

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
        pub const MESSAGE_STREAM: &str = "outbound";
    }
}

pub mod test {
    pub mod email_client {
        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT_IN_MILLIS: u64 = 200;
    }
}
