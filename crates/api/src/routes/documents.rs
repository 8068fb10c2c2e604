//! Stored document download.

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use misboard_core::storage::content_type_for_key;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::ApiPath;

/// Creates the document routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/documents/{*key}", get(download_document))
}

/// GET `/documents/{*key}`
/// Streams back a receipt or contract by its storage key.
async fn download_document(
    State(state): State<AppState>,
    ApiPath(key): ApiPath<String>,
) -> Result<Response, ApiError> {
    let bytes = state.storage.read(&key).await?;

    Ok(([(header::CONTENT_TYPE, content_type_for_key(&key))], bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{empty_state, json_body};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use bytes::Bytes;
    use http_body_util::BodyExt;
    use misboard_core::storage::DocumentKind;
    use tower::ServiceExt;

    fn app(state: AppState) -> Router {
        Router::new().merge(routes()).with_state(state)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_download_stored_receipt() {
        let state = empty_state("doc-read");
        let stored = state
            .storage
            .store(
                DocumentKind::Receipt,
                "taxi.png",
                "image/png",
                Bytes::from_static(b"\x89PNG"),
            )
            .await
            .unwrap();

        let response = app(state)
            .oneshot(get(&format!("/documents/{}", stored.key)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_missing_document() {
        let response = app(empty_state("doc-missing"))
            .oneshot(get("/documents/receipts/nope.pdf"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["error"], "NOT_FOUND");
    }
}
