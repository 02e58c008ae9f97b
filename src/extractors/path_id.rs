//! Extract a numeric id from the single path parameter of a route.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// `message_id` or `account_id` parsed as a decimal `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        raw.parse::<i32>()
            .map(PathId)
            .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", raw)))
    }
}
