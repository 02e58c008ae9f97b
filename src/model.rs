//! Domain records and request payloads.

use serde::{Deserialize, Serialize};

/// A registered account as stored in the `account` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Account {
    pub account_id: i32,
    pub username: String,
    pub password: String,
}

/// A message as stored in the `message` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub message_id: i32,
    pub posted_by: i32,
    pub message_text: String,
    pub time_posted_epoch: i64,
}

/// Body of `/register` and `/login`. Fields are optional so that null or
/// missing values reach the service layer and are rejected there.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }
}

/// Body of `POST /messages`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewMessage {
    #[serde(default)]
    pub posted_by: Option<i32>,
    #[serde(default)]
    pub message_text: Option<String>,
    #[serde(default)]
    pub time_posted_epoch: Option<i64>,
}

impl NewMessage {
    pub fn new(posted_by: i32, message_text: impl Into<String>, time_posted_epoch: i64) -> Self {
        NewMessage {
            posted_by: Some(posted_by),
            message_text: Some(message_text.into()),
            time_posted_epoch: Some(time_posted_epoch),
        }
    }
}

/// Body of `PATCH /messages/{message_id}`. Other message fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MessageTextPatch {
    #[serde(default)]
    pub message_text: Option<String>,
}

/// Validated account insert.
#[derive(Clone, Debug)]
pub struct AccountDraft {
    pub username: String,
    pub password: String,
}

/// Validated message insert.
#[derive(Clone, Debug)]
pub struct MessageDraft {
    pub posted_by: i32,
    pub message_text: String,
    pub time_posted_epoch: i64,
}
