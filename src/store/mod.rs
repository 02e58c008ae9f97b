//! Persistence adapters for accounts and messages.
//!
//! Absence is `Ok(None)` or an empty `Vec`; a failing database is always an `Err`.

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{Account, AccountDraft, Message, MessageDraft};
use async_trait::async_trait;

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert unless the username is taken. `Ok(None)` means the username already exists.
    async fn insert_account(&self, draft: &AccountDraft) -> Result<Option<Account>, AppError>;

    /// Account whose username and password both match exactly.
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, AppError>;

    async fn find_account_by_id(&self, account_id: i32) -> Result<Option<Account>, AppError>;

    /// Round trip to the backing store, used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn insert_message(&self, draft: &MessageDraft) -> Result<Message, AppError>;

    /// All messages ordered by id.
    async fn list_messages(&self) -> Result<Vec<Message>, AppError>;

    async fn find_message_by_id(&self, message_id: i32) -> Result<Option<Message>, AppError>;

    /// Returns the number of rows removed.
    async fn delete_message(&self, message_id: i32) -> Result<u64, AppError>;

    /// Returns the number of rows changed.
    async fn update_message_text(&self, message_id: i32, message_text: &str) -> Result<u64, AppError>;

    async fn list_messages_by_account(&self, account_id: i32) -> Result<Vec<Message>, AppError>;
}
