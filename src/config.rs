// src/config.rs
use std::env;
use thiserror::Error;

use crate::domain::slug::DEFAULT_SEQUENCE_SEPARATOR;

#[derive(Clone, Debug)]
pub struct AppConfig {
    database_url: String,
    max_connections: u32,
    sequence_separator: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

const fn default_max_connections() -> u32 {
    16
}

impl AppConfig {
    /// Build configuration from environment variables. `DATABASE_URL` is
    /// required; everything else falls back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Allow dotenv files to populate env vars when present.
        dotenvy::dotenv().ok();
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, e.g. a map in tests.
    pub fn from_source(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                ConfigError::Invalid("DATABASE_MAX_CONNECTIONS must be a positive integer".into())
            })?,
            None => default_max_connections(),
        };

        let sequence_separator = var("SLUG_SEQUENCE_SEPARATOR")
            .unwrap_or_else(|| DEFAULT_SEQUENCE_SEPARATOR.to_string());
        if sequence_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "SLUG_SEQUENCE_SEPARATOR cannot be empty".into(),
            ));
        }

        Ok(Self {
            database_url,
            max_connections,
            sequence_separator,
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub const fn max_connections(&self) -> u32 {
        self.max_connections
    }

    /// Default separator handed to `PostgresOwnerRegistry::from_config`.
    pub fn sequence_separator(&self) -> &str {
        &self.sequence_separator
    }
}
