//! In-process store with the same contract as the PostgreSQL adapter. Used by tests and
//! `SOCIAL_STORE=memory`.

use crate::error::AppError;
use crate::model::{Account, AccountDraft, Message, MessageDraft};
use crate::store::{AccountStore, MessageStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    accounts: BTreeMap<i32, Account>,
    messages: BTreeMap<i32, Message>,
    last_account_id: i32,
    last_message_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_account(&self, draft: &AccountDraft) -> Result<Option<Account>, AppError> {
        let mut tables = self.write()?;
        if tables.accounts.values().any(|a| a.username == draft.username) {
            return Ok(None);
        }
        tables.last_account_id += 1;
        let account = Account {
            account_id: tables.last_account_id,
            username: draft.username.clone(),
            password: draft.password.clone(),
        };
        tables.accounts.insert(account.account_id, account.clone());
        Ok(Some(account))
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.username == username && a.password == password)
            .cloned())
    }

    async fn find_account_by_id(&self, account_id: i32) -> Result<Option<Account>, AppError> {
        Ok(self.read()?.accounts.get(&account_id).cloned())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert_message(&self, draft: &MessageDraft) -> Result<Message, AppError> {
        let mut tables = self.write()?;
        if !tables.accounts.contains_key(&draft.posted_by) {
            return Err(AppError::Validation(format!(
                "account {} does not exist",
                draft.posted_by
            )));
        }
        tables.last_message_id += 1;
        let message = Message {
            message_id: tables.last_message_id,
            posted_by: draft.posted_by,
            message_text: draft.message_text.clone(),
            time_posted_epoch: draft.time_posted_epoch,
        };
        tables.messages.insert(message.message_id, message.clone());
        Ok(message)
    }

    async fn list_messages(&self) -> Result<Vec<Message>, AppError> {
        Ok(self.read()?.messages.values().cloned().collect())
    }

    async fn find_message_by_id(&self, message_id: i32) -> Result<Option<Message>, AppError> {
        Ok(self.read()?.messages.get(&message_id).cloned())
    }

    async fn delete_message(&self, message_id: i32) -> Result<u64, AppError> {
        let removed = self.write()?.messages.remove(&message_id);
        Ok(removed.map_or(0, |_| 1))
    }

    async fn update_message_text(&self, message_id: i32, message_text: &str) -> Result<u64, AppError> {
        let mut tables = self.write()?;
        match tables.messages.get_mut(&message_id) {
            Some(m) => {
                m.message_text = message_text.to_string();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_messages_by_account(&self, account_id: i32) -> Result<Vec<Message>, AppError> {
        Ok(self
            .read()?
            .messages
            .values()
            .filter(|m| m.posted_by == account_id)
            .cloned()
            .collect())
    }
}
