//! # Configuration
//!
//! Everything the service needs is read once at startup into an
//! [`AppConfig`] and handed to [`crate::app`]. Nothing reads the environment
//! after that.
//!
//! ## Environment Variables
//!
//! - `DATABASE_URL` / `DATABASE_URL_FILE` - Postgres connection string (required)
//! - `API_USERNAME` / `API_USERNAME_FILE` - Basic-auth username (required)
//! - `API_PASSWORD` / `API_PASSWORD_FILE` - Basic-auth password (required)
//! - `BIND_ADDRESS` - Listen address, defaults to `0.0.0.0:8013`
//! - `API_PREFIX` - Route prefix, defaults to `/tracking-progress/v1`
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins
//! - `DB_MAX_CONNECTIONS` - Pool size, defaults to 5
//! - `LOG_FORMAT` - `json` for Bunyan output, anything else for plain text

use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

use crate::middleware::BasicCredentials;
use crate::utils::constant::*;
use crate::utils::secret::get_secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("env variable `{0}` should be set")]
    Missing(&'static str),

    #[error("env variable `{name}` has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug)]
pub struct AppConfig {
    pub database_url: SecretString,
    pub credentials: BasicCredentials,
    pub bind_address: SocketAddr,
    pub api_prefix: String,
    pub allowed_origins: Vec<HeaderValue>,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Builds a configuration with every optional setting at its default.
    pub fn new(database_url: String, credentials: BasicCredentials) -> Self {
        Self {
            database_url: SecretString::from(database_url),
            credentials,
            bind_address: DEFAULT_BIND_ADDRESS
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8013))),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .copied()
                .map(HeaderValue::from_static)
                .collect(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            log_format: LogFormat::Pretty,
        }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get_secret(&lookup, "DATABASE_URL_FILE", "DATABASE_URL")
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let username = get_secret(&lookup, "API_USERNAME_FILE", "API_USERNAME")
            .ok_or(ConfigError::Missing("API_USERNAME"))?;
        let password = get_secret(&lookup, "API_PASSWORD_FILE", "API_PASSWORD")
            .ok_or(ConfigError::Missing("API_PASSWORD"))?;

        let mut config = Self::new(database_url, BasicCredentials::new(username, password));

        if let Some(value) = lookup("BIND_ADDRESS") {
            config.bind_address = value.parse().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDRESS",
                value,
            })?;
        }

        if let Some(value) = lookup("API_PREFIX") {
            config.api_prefix = normalize_prefix(&value);
        }

        if let Some(value) = lookup("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&value)?;
        }

        if let Some(value) = lookup("DB_MAX_CONNECTIONS") {
            config.db_max_connections = value
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "DB_MAX_CONNECTIONS",
                    value,
                })?;
        }

        if let Some(value) = lookup("LOG_FORMAT") {
            config.log_format = if value.eq_ignore_ascii_case("json") {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            };
        }

        Ok(config)
    }
}

/// Ensures a leading slash and strips trailing ones, so `""` and `"/"` both
/// mount the routes at the root.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_origins(value: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                name: "ALLOWED_ORIGINS",
                value: origin.to_string(),
            })
        })
        .collect()
}
