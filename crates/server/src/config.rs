use std::env;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value `{value}`")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub oidc_issuer_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required =
            |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "DB_MAX_CONNECTIONS",
                value,
            })?,
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            oidc_issuer_url: required("OIDC_ISSUER_URL")?,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            db_max_connections,
        })
    }
}
