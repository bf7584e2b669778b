use std::path::Path;
use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use framesight_api::config::ServerConfig;
use framesight_api::router::build_app_router;
use framesight_api::state::AppState;
use framesight_core::storage::StorageLayout;
use framesight_pipeline::{AnalysisPipeline, PipelineConfig};

/// Build a test `ServerConfig` rooted at the given storage directory.
///
/// The detector endpoint points at a discard port; tests never exercise a
/// live inference call.
pub fn test_config(storage_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: storage_root.to_path_buf(),
        detector_url: "http://127.0.0.1:9/detect/test/1".to_string(),
        detector_api_key: "test-key".to_string(),
        sampling_interval: 10,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and storage root.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool, storage_root: &Path) -> Router {
    let config = test_config(storage_root);

    let storage = StorageLayout::new(config.storage_root.clone());
    let pipeline = Arc::new(AnalysisPipeline::new(
        PipelineConfig {
            detector_url: config.detector_url.clone(),
            detector_api_key: config.detector_api_key.clone(),
            sampling_interval: config.sampling_interval,
        },
        storage,
        pool.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pipeline,
        frames_lock: Arc::new(tokio::sync::Mutex::new(())),
    };

    build_app_router(state, &config)
}

/// Issue a GET request against the app.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with the given body and content type.
#[allow(dead_code)]
pub async fn post(app: Router, uri: &str, content_type: &str, body: impl Into<Body>) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, content_type)
            .body(body.into())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into bytes.
#[allow(dead_code)]
pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Collect a response body and parse it as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
