// Server configuration
// Defaults are usable as-is, every field can be overridden from the environment

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

pub const HOST_VAR: &str = "TRAVEL_API_HOST";
pub const PORT_VAR: &str = "TRAVEL_API_PORT";
pub const DATA_DIR_VAR: &str = "TRAVEL_API_DATA_DIR";
pub const LOG_VAR: &str = "TRAVEL_API_LOG";
pub const CORS_MAX_AGE_VAR: &str = "TRAVEL_API_CORS_MAX_AGE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    // None serves the tables compiled into the binary
    pub data_dir: Option<PathBuf>,
    // Used when RUST_LOG is not set
    pub log_filter: String,
    pub cors_max_age_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: None,
            log_filter: "info".to_string(),
            cors_max_age_secs: 60 * 60,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Build from any key lookup, starting from the defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = parse_var(PORT_VAR, &port)?;
        }
        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(filter) = lookup(LOG_VAR) {
            config.log_filter = filter;
        }
        if let Some(max_age) = lookup(CORS_MAX_AGE_VAR) {
            config.cors_max_age_secs = parse_var(CORS_MAX_AGE_VAR, &max_age)?;
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
