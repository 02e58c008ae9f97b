//! Message handlers: create, list, read, update, delete, list by account.

use crate::error::AppError;
use crate::extractors::{JsonBody, PathId};
use crate::model::{MessageTextPatch, NewMessage};
use crate::response::{found_or_empty, ok_many, ok_one};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn create_message(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewMessage>,
) -> Result<impl IntoResponse, AppError> {
    let message = state.messages.create(&body).await?;
    Ok(ok_one(message))
}

pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.messages.get_all().await?;
    Ok(ok_many(rows))
}

pub async fn read_message(
    State(state): State<AppState>,
    PathId(message_id): PathId,
) -> Result<impl IntoResponse, AppError> {
    let row = state.messages.get_by_id(message_id).await?;
    Ok(found_or_empty(row))
}

pub async fn update_message(
    State(state): State<AppState>,
    PathId(message_id): PathId,
    JsonBody(body): JsonBody<MessageTextPatch>,
) -> Result<impl IntoResponse, AppError> {
    let row = state
        .messages
        .update_by_id(message_id, body.message_text.as_deref())
        .await?;
    Ok(ok_one(row))
}

pub async fn delete_message(
    State(state): State<AppState>,
    PathId(message_id): PathId,
) -> Result<impl IntoResponse, AppError> {
    let row = state.messages.delete_by_id(message_id).await?;
    Ok(found_or_empty(row))
}

pub async fn list_account_messages(
    State(state): State<AppState>,
    PathId(account_id): PathId,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.messages.get_all_by_account(account_id).await?;
    Ok(ok_many(rows))
}
