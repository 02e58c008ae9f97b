//! Response helpers. Records are returned as bare JSON, without an envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn ok_one<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn ok_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<Vec<T>>) {
    (StatusCode::OK, Json(data))
}

/// 200 with the record as JSON, or 200 with an empty body when there is none.
pub fn found_or_empty<T: Serialize>(record: Option<T>) -> Response {
    match record {
        Some(data) => ok_one(data).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn absent_record_is_empty_ok() {
        let response = found_or_empty::<u32>(None);
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn present_record_is_json() {
        let response = found_or_empty(Some(serde_json::json!({"message_id": 1})));
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"message_id":1}"#);
    }
}
