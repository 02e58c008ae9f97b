//! Shared application state for all routes. Services are stateless; all data lives in the stores.

use crate::service::{AccountService, MessageService};
use crate::store::{AccountStore, MessageStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub messages: MessageService,
    /// Used by the readiness probe.
    pub health: Arc<dyn AccountStore>,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountStore>, messages: Arc<dyn MessageStore>) -> Self {
        AppState {
            accounts: AccountService::new(accounts.clone()),
            messages: MessageService::new(accounts.clone(), messages),
            health: accounts,
        }
    }

    /// State backed by one store implementing both adapters (e.g. `PgStore`, `MemoryStore`).
    pub fn from_store<T>(store: Arc<T>) -> Self
    where
        T: AccountStore + MessageStore + 'static,
    {
        AppState::new(store.clone(), store)
    }
}
