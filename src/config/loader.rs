//! Load server configuration from environment variables.

use crate::config::types::{ServerConfig, StoreKind};
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

impl ServerConfig {
    /// Read configuration from the process environment. Call `dotenvy::dotenv()` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();
        if let Some(url) = lookup("DATABASE_URL") {
            if url.trim().is_empty() {
                return Err(ConfigError::Missing("DATABASE_URL"));
            }
            config.database_url = url;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            config.bind_addr = parse("BIND_ADDR", &v)?;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            config.max_connections = parse("DB_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            config.acquire_timeout = Duration::from_secs(parse("DB_ACQUIRE_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("BODY_LIMIT_BYTES") {
            config.body_limit = parse("BODY_LIMIT_BYTES", &v)?;
        }
        if let Some(v) = lookup("SOCIAL_STORE") {
            config.store = StoreKind::from_str(&v)?;
        }
        if let Some(v) = lookup("SOCIAL_SCHEMA") {
            if !is_identifier(&v) {
                return Err(ConfigError::Invalid { key: "SOCIAL_SCHEMA", value: v });
            }
            config.schema = v;
        }
        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

/// Unquoted PostgreSQL identifier: letter or underscore, then letters, digits, underscores.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
