use crate::error::AppError;
use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// JSON request body, parsed whatever the `Content-Type` header says.
/// An unreadable or malformed body becomes `AppError::BadRequest`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Credentials;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    async fn extract(req: Request) -> Result<Credentials, AppError> {
        JsonBody::<Credentials>::from_request(req, &()).await.map(|JsonBody(c)| c)
    }

    #[tokio::test]
    async fn parses_without_content_type() {
        let req = HttpRequest::builder()
            .method("POST")
            .body(Body::from(r#"{"username":"alice","password":"abcd"}"#))
            .unwrap();
        let creds = extract(req).await.unwrap();
        assert_eq!(creds.username.as_deref(), Some("alice"));
        assert_eq!(creds.password.as_deref(), Some("abcd"));
    }

    #[tokio::test]
    async fn ignores_non_json_content_type() {
        let req = HttpRequest::builder()
            .method("POST")
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"username":"alice"}"#))
            .unwrap();
        assert_eq!(extract(req).await.unwrap().username.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn malformed_or_empty_body_is_bad_request() {
        for raw in ["{not json", ""] {
            let req = HttpRequest::builder().method("POST").body(Body::from(raw)).unwrap();
            assert!(matches!(extract(req).await, Err(AppError::BadRequest(_))));
        }
    }
}
