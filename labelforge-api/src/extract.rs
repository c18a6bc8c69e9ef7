/// Request extractors
///
/// Wrap axum's extractors so rejections come back as [`ApiError`] JSON
/// bodies instead of axum's plain-text defaults.

use crate::error::ApiError;
use axum::extract::FromRequestParts;

/// Query string extractor rejecting with [`ApiError::BadRequest`]
///
/// A missing required parameter or one that does not parse (e.g.
/// `item_id=abc`) yields a 400 with `{"error": "bad_request", ...}`.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        id: i64,
    }

    async fn extract(uri: &str) -> Result<ApiQuery<Params>, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ApiQuery::<Params>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_query_is_extracted() {
        let ApiQuery(params) = extract("/x?id=42").await.unwrap();
        assert_eq!(params.id, 42);
    }

    #[tokio::test]
    async fn test_invalid_query_is_bad_request() {
        let missing = extract("/x").await.unwrap_err();
        assert!(matches!(missing, ApiError::BadRequest(_)));

        let not_a_number = extract("/x?id=abc").await.unwrap_err();
        assert_eq!(not_a_number.status(), StatusCode::BAD_REQUEST);
    }
}
