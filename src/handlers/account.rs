//! Account handlers: register and login.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::Credentials;
use crate::response::ok_one;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.register(&body).await?;
    Ok(ok_one(account))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Credentials>,
) -> Result<impl IntoResponse, AppError> {
    let account = state.accounts.login(&body).await?;
    Ok(ok_one(account))
}
