//! Social API: account registration/login and message CRUD over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::{Account, Credentials, Message, MessageTextPatch, NewMessage};
pub use response::{found_or_empty, ok_many, ok_one};
pub use routes::{app, common_routes, social_routes};
pub use service::{AccountService, MessageService};
pub use state::AppState;
pub use store::{ensure_database_exists, AccountStore, MemoryStore, MessageStore, PgStore};
