use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_url_handler, health_handler, redirect_handler};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/shorten", post(create_url_handler))
            .route("/{short_code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use snip_core::{ShortCode, Shortened, Shortener, ShortenerError, UrlRecord};
    use snip_generator::SeqGenerator;
    use snip_shortener::ShortenerService;
    use snip_storage::InMemoryRepository;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BASE_URL: &str = "http://localhost:3000";

    fn router() -> Router {
        let shortener =
            ShortenerService::new(InMemoryRepository::new(), SeqGenerator::with_prefix("sn"));
        App::router(AppState::new(Arc::new(shortener), BASE_URL))
    }

    struct FailingShortener(ShortenerError);

    #[async_trait]
    impl Shortener for FailingShortener {
        async fn shorten(&self, _: &str) -> Result<Shortened, ShortenerError> {
            Err(self.0.clone())
        }

        async fn resolve(&self, _: &ShortCode) -> Result<Option<UrlRecord>, ShortenerError> {
            Err(self.0.clone())
        }
    }

    fn failing_router(error: ShortenerError) -> Router {
        App::router(AppState::new(Arc::new(FailingShortener(error)), BASE_URL))
    }

    fn shorten_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/shorten")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    fn get_request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn shorten_new_url_returns_created() {
        let response = router()
            .oneshot(shorten_request(r#"{"longUrl":"https://example.com/a"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["short_url"], "http://localhost:3000/sn000000");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn shorten_known_url_returns_ok_with_message() {
        let router = router();

        let first = router
            .clone()
            .oneshot(shorten_request(r#"{"longUrl":"https://example.com/a"}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = router
            .oneshot(shorten_request(r#"{"longUrl":"https://example.com/a"}"#))
            .await
            .unwrap();

        assert_eq!(second.status(), StatusCode::OK);
        let body = json_body(second).await;
        assert_eq!(body["short_url"], "http://localhost:3000/sn000000");
        assert_eq!(body["message"], "Short URL for this link already exists.");
    }

    #[tokio::test]
    async fn shorten_invalid_url_returns_bad_request() {
        let response = router()
            .oneshot(shorten_request(r#"{"longUrl":"not a url"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid URL provided.");
    }

    #[tokio::test]
    async fn shorten_without_long_url_returns_bad_request() {
        for body in [r#"{}"#, r#"not json"#, r#"{"longUrl":42}"#] {
            let response = router().oneshot(shorten_request(body)).await.unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json_body(response).await["error"], "Invalid URL provided.");
        }
    }

    #[tokio::test]
    async fn redirect_known_code() {
        let router = router();
        router
            .clone()
            .oneshot(shorten_request(r#"{"longUrl":"https://example.com/a?b=c"}"#))
            .await
            .unwrap();

        let response = router.oneshot(get_request("/sn000000")).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/a?b=c"
        );
    }

    #[tokio::test]
    async fn redirect_unknown_code_returns_not_found() {
        for path in ["/zzzzzzz", "/doesnotexist", "/a!", "/%FF%FE"] {
            let response = router().oneshot(get_request(path)).await.unwrap();

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "path: {path}");
            assert_eq!(json_body(response).await["error"], "Short URL not found.");
        }
    }

    #[tokio::test]
    async fn storage_failure_returns_internal_error() {
        let error = ShortenerError::StorageUnavailable("connection refused".to_string());

        let response = failing_router(error.clone())
            .oneshot(shorten_request(r#"{"longUrl":"https://example.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Database error.");
        assert_eq!(body["details"], error.to_string());

        let response = failing_router(error)
            .oneshot(get_request("/abc1234"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "Database error.");
    }

    #[tokio::test]
    async fn exhausted_allocation_returns_internal_error() {
        let response = failing_router(ShortenerError::AllocationExhausted { attempts: 5 })
            .oneshot(shorten_request(r#"{"longUrl":"https://example.com"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Failed to create short URL.");
        assert!(body["details"].as_str().unwrap().contains('5'));
    }

    #[tokio::test]
    async fn health() {
        let response = router().oneshot(get_request("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }
}
