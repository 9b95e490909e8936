// ABOUTME: Typed server configuration loaded from environment variables
// ABOUTME: Database connection settings, CORS origin and listener address with defaults

use std::env;
use std::fmt;
use std::num::ParseIntError;

use thiserror::Error;
use tracing::debug;

use crate::constants::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number in {var}: {source}")]
    InvalidPort {
        var: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid connection pool size: {0}")]
    InvalidPoolSize(String),
}

/// Where the todo store lives.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseTarget {
    /// A complete connection URL taken from `DATABASE_URL`.
    Url(String),
    /// Discrete PostgreSQL settings from the `DB_*` variables.
    Postgres {
        host: String,
        port: u16,
        username: String,
        password: String,
        database: String,
    },
}

impl DatabaseTarget {
    /// Human readable description that never includes the password
    pub fn redacted(&self) -> String {
        match self {
            DatabaseTarget::Url(url) => redact_url(url),
            DatabaseTarget::Postgres {
                host,
                port,
                username,
                database,
                ..
            } => format!("postgres://{}@{}:{}/{}", username, host, port, database),
        }
    }
}

impl fmt::Debug for DatabaseTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DatabaseTarget").field(&self.redacted()).finish()
    }
}

/// Strip the `user:password@` credentials section from a URL
fn redact_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub target: DatabaseTarget,
    pub max_connections: u32,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
    pub database: DatabaseConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var(HOST).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_port(PORT, var(PORT), DEFAULT_PORT)?;

        let cors_origin = var(CORS_ORIGINS).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        let target = match var(DATABASE_URL) {
            Some(url) => DatabaseTarget::Url(url),
            None => DatabaseTarget::Postgres {
                host: var(DB_HOST).unwrap_or_else(|| DEFAULT_DB_HOST.to_string()),
                port: parse_port(DB_PORT, var(DB_PORT), DEFAULT_DB_PORT)?,
                username: var(DB_USERNAME).unwrap_or_else(|| DEFAULT_DB_USERNAME.to_string()),
                password: var(DB_PASSWORD).unwrap_or_else(|| DEFAULT_DB_PASSWORD.to_string()),
                database: var(DB_DATABASE).unwrap_or_else(|| DEFAULT_DB_DATABASE.to_string()),
            },
        };

        let max_connections = match var(DB_MAX_CONNECTIONS) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidPoolSize(raw)),
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let config = Config {
            host,
            port,
            cors_origin,
            database: DatabaseConfig {
                target,
                max_connections,
            },
        };

        debug!(?config, "Configuration loaded");

        Ok(config)
    }
}

fn parse_port(var: &'static str, raw: Option<String>, default: u16) -> Result<u16, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    let port = raw
        .trim()
        .parse::<u16>()
        .map_err(|source| ConfigError::InvalidPort { var, source })?;

    // Validate port is in valid range
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }

    Ok(port)
}
