//! Runtime configuration, read once from the environment at startup.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `DISCORD_WEBHOOK_URL_DEVELOPMENT` | yes | |
//! | `DISCORD_WEBHOOK_URL_TESTING` | yes | |
//! | `PORT` | no | `8080` |
//! | `RELAY_HTTP_TIMEOUT_SECS` | no | `10` |
//! | `RELAY_MAX_BODY_BYTES` | no | 25 MiB |
//! | `OTEL_EXPORTER_OTLP_ENDPOINT` | no | unset (OTLP export disabled) |
//!
//! Empty values are treated the same as unset ones. A `.env` file, if one is
//! found, is loaded into the process environment first; variables already set
//! in the environment take precedence over it.

use std::{
    fmt::Display,
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use discord::ChannelEndpoints;
use listener::DEFAULT_MAX_BODY_BYTES;
use thiserror::Error;

pub const DEVELOPMENT_URL_VAR: &str = "DISCORD_WEBHOOK_URL_DEVELOPMENT";
pub const TESTING_URL_VAR: &str = "DISCORD_WEBHOOK_URL_TESTING";
pub const PORT_VAR: &str = "PORT";
pub const HTTP_TIMEOUT_VAR: &str = "RELAY_HTTP_TIMEOUT_SECS";
pub const MAX_BODY_BYTES_VAR: &str = "RELAY_MAX_BODY_BYTES";
pub const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{name} has invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Result of looking for a `.env` file.
#[derive(Debug)]
pub enum EnvFile {
    Loaded(PathBuf),
    NotFound,
    Invalid(dotenvy::Error),
}

impl EnvFile {
    /// Loads `.env` from the working directory or one of its ancestors.
    pub fn load() -> Self {
        Self::from_result(dotenvy::dotenv())
    }

    /// Loads the file at `path`.
    #[cfg(test)]
    pub fn load_from(path: &std::path::Path) -> Self {
        Self::from_result(dotenvy::from_path(path).map(|()| path.to_path_buf()))
    }

    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(e) if e.not_found() => Self::NotFound,
            Err(e) => Self::Invalid(e),
        }
    }
}

/// Validated process configuration.
///
/// The `Debug` output never contains the webhook URLs.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub port: u16,
    pub endpoints: ChannelEndpoints,
    pub http_timeout: Duration,
    pub max_body_bytes: usize,
    pub otlp_endpoint: Option<String>,
}

impl RelayConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let endpoints = ChannelEndpoints {
            development: required(DEVELOPMENT_URL_VAR)?,
            testing: required(TESTING_URL_VAR)?,
        };

        let port = parse_or(get(PORT_VAR), PORT_VAR, DEFAULT_PORT)?;
        let timeout_secs = parse_or(
            get(HTTP_TIMEOUT_VAR),
            HTTP_TIMEOUT_VAR,
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: HTTP_TIMEOUT_VAR,
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        let max_body_bytes = parse_or(
            get(MAX_BODY_BYTES_VAR),
            MAX_BODY_BYTES_VAR,
            DEFAULT_MAX_BODY_BYTES,
        )?;

        Ok(Self {
            port,
            endpoints,
            http_timeout: Duration::from_secs(timeout_secs),
            max_body_bytes,
            otlp_endpoint: get(OTLP_ENDPOINT_VAR),
        })
    }
}

fn parse_or<T>(value: Option<String>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        None => Ok(default),
        Some(raw) => {
            let parsed = raw.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value: raw,
            })
        }
    }
}
