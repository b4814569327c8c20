//! Runtime configuration read from the environment.
use std::net::SocketAddr;

use axum::http::HeaderValue;

pub const DATABASE_URL_VAR: &str = "SPENDING_TRACKER_DATABASE_URL";
pub const BIND_ADDR_VAR: &str = "SPENDING_TRACKER_BIND_ADDR";
pub const ALLOWED_ORIGIN_VAR: &str = "SPENDING_TRACKER_ALLOWED_ORIGIN";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

const DEFAULT_DATABASE_URL: &str = "sqlite:spending_tracker.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBindAddr { var: &'static str, value: String },
    #[error("{var} is not a valid origin: {value}")]
    InvalidOrigin { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub allowed_origin: HeaderValue,
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source; unset variables
    /// take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(var) {
                None => Ok(default.to_string()),
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
                Some(value) => Ok(value.trim().to_string()),
            }
        };

        let database_url = read(DATABASE_URL_VAR, DEFAULT_DATABASE_URL)?;

        let bind_addr = read(BIND_ADDR_VAR, DEFAULT_BIND_ADDR)?;
        let bind_addr = bind_addr.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidBindAddr {
            var: BIND_ADDR_VAR,
            value: bind_addr.clone(),
        })?;

        let allowed_origin = read(ALLOWED_ORIGIN_VAR, DEFAULT_ALLOWED_ORIGIN)?;
        let allowed_origin = HeaderValue::from_str(&allowed_origin).map_err(|_| ConfigError::InvalidOrigin {
            var: ALLOWED_ORIGIN_VAR,
            value: allowed_origin.clone(),
        })?;

        let log_filter = read(LOG_FILTER_VAR, DEFAULT_LOG_FILTER)?;

        Ok(Self {
            database_url,
            bind_addr,
            allowed_origin,
            log_filter,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.database_url, defaults.database_url);
        assert_eq!(config.bind_addr, defaults.bind_addr);
        assert_eq!(config.allowed_origin, defaults.allowed_origin);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, "sqlite:/tmp/other.db"),
            (BIND_ADDR_VAR, "0.0.0.0:8081"),
            (ALLOWED_ORIGIN_VAR, "https://budget.example.com"),
            (LOG_FILTER_VAR, "spending_tracker_backend=debug"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite:/tmp/other.db");
        assert_eq!(config.bind_addr.port(), 8081);
        assert_eq!(config.allowed_origin, "https://budget.example.com");
        assert_eq!(config.log_filter, "spending_tracker_backend=debug");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let bad_addr = AppConfig::from_lookup(lookup_from(&[(BIND_ADDR_VAR, "localhost")]));
        assert!(matches!(bad_addr, Err(ConfigError::InvalidBindAddr { .. })));

        let bad_origin = AppConfig::from_lookup(lookup_from(&[(ALLOWED_ORIGIN_VAR, "http://bad\norigin")]));
        assert!(matches!(bad_origin, Err(ConfigError::InvalidOrigin { .. })));

        let empty = AppConfig::from_lookup(lookup_from(&[(DATABASE_URL_VAR, "  ")]));
        assert_eq!(empty.unwrap_err(), ConfigError::Empty { var: DATABASE_URL_VAR });
    }
}
