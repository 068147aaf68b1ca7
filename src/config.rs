//! Process configuration from environment variables (a `.env` file is honoured by the binary).

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://orders.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ServiceConfig {
    /// Read `DATABASE_URL`, `BIND_ADDR` and `DB_MAX_CONNECTIONS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(raw) = lookup("DB_MAX_CONNECTIONS") {
            config.max_connections = match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        value: raw,
                    })
                }
            };
        }
        Ok(config)
    }
}
