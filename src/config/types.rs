//! Server configuration types.

use std::net::SocketAddr;
use std::time::Duration;

/// Which storage backend the server runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local tables; data is lost on restart.
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            _ => Err(crate::error::ConfigError::Invalid {
                key: "SOCIAL_STORE",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
    pub store: StoreKind,
    /// Schema holding the `account` and `message` tables.
    pub schema: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: "postgres://localhost/social".into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            body_limit: 64 * 1024,
            store: StoreKind::Postgres,
            schema: "public".into(),
        }
    }
}
