//! Message creation, lookup, update and deletion.

use crate::error::AppError;
use crate::model::{Message, MessageDraft, NewMessage};
use crate::service::{AccountService, RequestValidator};
use crate::store::{AccountStore, MessageStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct MessageService {
    accounts: AccountService,
    messages: Arc<dyn MessageStore>,
}

impl MessageService {
    pub fn new(accounts: Arc<dyn AccountStore>, messages: Arc<dyn MessageStore>) -> Self {
        MessageService {
            accounts: AccountService::new(accounts),
            messages,
        }
    }

    /// Validate text and author, then persist. Returns the stored record with its id.
    pub async fn create(&self, candidate: &NewMessage) -> Result<Message, AppError> {
        let text = RequestValidator::message_text(candidate.message_text.as_deref())?;
        let posted_by = candidate
            .posted_by
            .ok_or_else(|| AppError::Validation("posted_by is required".into()))?;
        if self.accounts.get_by_id(posted_by).await?.is_none() {
            tracing::warn!(posted_by, "message rejected: unknown account");
            return Err(AppError::Validation(format!("account {} does not exist", posted_by)));
        }
        let draft = MessageDraft {
            posted_by,
            message_text: text.to_string(),
            time_posted_epoch: candidate.time_posted_epoch.unwrap_or(0),
        };
        self.messages.insert_message(&draft).await
    }

    pub async fn get_all(&self) -> Result<Vec<Message>, AppError> {
        self.messages.list_messages().await
    }

    pub async fn get_by_id(&self, message_id: i32) -> Result<Option<Message>, AppError> {
        self.messages.find_message_by_id(message_id).await
    }

    /// Remove a message and return it as it was. Deleting an unknown id is a no-op, and so is
    /// losing the row to a concurrent delete between the read and the delete.
    pub async fn delete_by_id(&self, message_id: i32) -> Result<Option<Message>, AppError> {
        let Some(message) = self.messages.find_message_by_id(message_id).await? else {
            return Ok(None);
        };
        if self.messages.delete_message(message_id).await? == 0 {
            tracing::debug!(message_id, "message already deleted");
            return Ok(None);
        }
        tracing::info!(message_id, "message deleted");
        Ok(Some(message))
    }

    /// Replace the text of an existing message. The returned record is re-read from storage.
    pub async fn update_by_id(
        &self,
        message_id: i32,
        new_text: Option<&str>,
    ) -> Result<Message, AppError> {
        let text = RequestValidator::message_text(new_text)?;
        let not_found = || AppError::NotFound(format!("message {}", message_id));
        if self.messages.update_message_text(message_id, text).await? == 0 {
            return Err(not_found());
        }
        self.messages
            .find_message_by_id(message_id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn get_all_by_account(&self, account_id: i32) -> Result<Vec<Message>, AppError> {
        self.messages.list_messages_by_account(account_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccountDraft, NewMessage};
    use crate::store::MemoryStore;

    async fn setup() -> (MessageService, i32) {
        let store = Arc::new(MemoryStore::new());
        let account = store
            .insert_account(&AccountDraft {
                username: "alice".into(),
                password: "abcd".into(),
            })
            .await
            .unwrap()
            .unwrap();
        (MessageService::new(store.clone(), store), account.account_id)
    }

    #[tokio::test]
    async fn create_enforces_text_length() {
        let (svc, author) = setup().await;
        assert!(svc.create(&NewMessage::new(author, "", 1)).await.is_err());
        assert!(svc.create(&NewMessage::new(author, "a".repeat(256), 1)).await.is_err());
        let m = svc.create(&NewMessage::new(author, "a".repeat(255), 1)).await.unwrap();
        assert_eq!(m.message_text.len(), 255);
        assert_eq!(m.posted_by, author);
    }

    #[tokio::test]
    async fn create_requires_existing_author() {
        let (svc, author) = setup().await;
        assert!(matches!(
            svc.create(&NewMessage::new(author + 100, "hi", 1)).await,
            Err(AppError::Validation(_))
        ));
        let no_author = NewMessage {
            posted_by: None,
            message_text: Some("hi".into()),
            time_posted_epoch: Some(1),
        };
        assert!(svc.create(&no_author).await.is_err());
        assert!(svc.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_twice_is_idempotent() {
        let (svc, author) = setup().await;
        let m = svc.create(&NewMessage::new(author, "bye", 5)).await.unwrap();
        assert_eq!(svc.delete_by_id(m.message_id).await.unwrap(), Some(m.clone()));
        assert_eq!(svc.delete_by_id(m.message_id).await.unwrap(), None);
        assert_eq!(svc.get_by_id(m.message_id).await.unwrap(), None);
    }

    /// Delegates to a `MemoryStore`, but reports every delete as having removed nothing,
    /// as when another request deleted the row first.
    struct LostDeleteStore(MemoryStore);

    #[async_trait::async_trait]
    impl MessageStore for LostDeleteStore {
        async fn insert_message(&self, draft: &MessageDraft) -> Result<Message, AppError> {
            self.0.insert_message(draft).await
        }
        async fn list_messages(&self) -> Result<Vec<Message>, AppError> {
            self.0.list_messages().await
        }
        async fn find_message_by_id(&self, message_id: i32) -> Result<Option<Message>, AppError> {
            self.0.find_message_by_id(message_id).await
        }
        async fn delete_message(&self, message_id: i32) -> Result<u64, AppError> {
            self.0.delete_message(message_id).await?;
            Ok(0)
        }
        async fn update_message_text(&self, message_id: i32, message_text: &str) -> Result<u64, AppError> {
            self.0.update_message_text(message_id, message_text).await
        }
        async fn list_messages_by_account(&self, account_id: i32) -> Result<Vec<Message>, AppError> {
            self.0.list_messages_by_account(account_id).await
        }
    }

    #[tokio::test]
    async fn delete_that_removes_nothing_returns_none() {
        let inner = MemoryStore::new();
        let account = inner
            .insert_account(&AccountDraft {
                username: "alice".into(),
                password: "abcd".into(),
            })
            .await
            .unwrap()
            .unwrap();
        let store = Arc::new(LostDeleteStore(inner));
        let svc = MessageService::new(Arc::new(MemoryStore::new()), store.clone());
        let m = store
            .insert_message(&MessageDraft {
                posted_by: account.account_id,
                message_text: "hi".into(),
                time_posted_epoch: 1,
            })
            .await
            .unwrap();
        assert_eq!(svc.delete_by_id(m.message_id).await.unwrap(), None);
        assert_eq!(svc.get_by_id(m.message_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_changes_only_text() {
        let (svc, author) = setup().await;
        let m = svc.create(&NewMessage::new(author, "hi", 1000)).await.unwrap();
        let updated = svc.update_by_id(m.message_id, Some("hi there")).await.unwrap();
        assert_eq!(updated.message_id, m.message_id);
        assert_eq!(updated.posted_by, m.posted_by);
        assert_eq!(updated.time_posted_epoch, 1000);
        assert_eq!(updated.message_text, "hi there");
        assert_eq!(svc.get_by_id(m.message_id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_rejects_bad_text_and_unknown_id() {
        let (svc, author) = setup().await;
        let m = svc.create(&NewMessage::new(author, "hi", 1)).await.unwrap();
        assert!(matches!(
            svc.update_by_id(m.message_id, Some("")).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            svc.update_by_id(m.message_id, None).await,
            Err(AppError::Validation(_))
        ));
        assert!(svc.update_by_id(m.message_id, Some("x".repeat(256).as_str())).await.is_err());
        assert!(matches!(
            svc.update_by_id(m.message_id + 1, Some("valid")).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(svc.get_by_id(m.message_id).await.unwrap().unwrap().message_text, "hi");
    }

    #[tokio::test]
    async fn messages_by_account_returns_every_row() {
        let (svc, author) = setup().await;
        assert!(svc.get_all_by_account(author).await.unwrap().is_empty());
        for i in 0..3 {
            svc.create(&NewMessage::new(author, format!("m{}", i), i)).await.unwrap();
        }
        let mine = svc.get_all_by_account(author).await.unwrap();
        assert_eq!(mine.len(), 3);
        assert!(mine.iter().all(|m| m.posted_by == author));
        assert!(svc.get_all_by_account(author + 1).await.unwrap().is_empty());
    }
}
