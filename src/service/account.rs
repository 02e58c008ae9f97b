//! Registration and login.

use crate::error::AppError;
use crate::model::{Account, AccountDraft, Credentials};
use crate::service::RequestValidator;
use crate::store::AccountStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountStore>) -> Self {
        AccountService { accounts }
    }

    /// Create an account. The username check and the insert are one conditional
    /// statement, so concurrent registrations cannot both win.
    pub async fn register(&self, candidate: &Credentials) -> Result<Account, AppError> {
        let username = RequestValidator::username(candidate.username.as_deref())?;
        let password = RequestValidator::password(candidate.password.as_deref())?;
        let draft = AccountDraft {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.accounts.insert_account(&draft).await? {
            Some(account) => {
                tracing::info!(account_id = account.account_id, "account registered");
                Ok(account)
            }
            None => {
                tracing::warn!(username = %draft.username, "registration rejected: username taken");
                Err(AppError::Conflict(format!("username '{}' already exists", draft.username)))
            }
        }
    }

    /// Exact match on username and password.
    pub async fn login(&self, credentials: &Credentials) -> Result<Account, AppError> {
        let (Some(username), Some(password)) =
            (credentials.username.as_deref(), credentials.password.as_deref())
        else {
            return Err(AppError::Unauthorized);
        };
        self.accounts
            .find_by_credentials(username, password)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    pub async fn get_by_id(&self, account_id: i32) -> Result<Option<Account>, AppError> {
        self.accounts.find_account_by_id(account_id).await
    }
}
