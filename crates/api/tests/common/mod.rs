#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use redteam_api::config::ServerConfig;
use redteam_api::engine::{JobDispatcher, RandomMetrics, RunRegistry};
use redteam_api::router::build_app_router;
use redteam_api::state::AppState;
use redteam_events::{Notifier, RecordingNotifier};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dashboard dev
/// server) and no pause between milestones.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        webhook_url: "http://127.0.0.1:9/unused".to_string(),
        webhook_timeout_secs: 1,
        milestone_delay_ms: 0,
        run_retention_secs: 3600,
    }
}

/// A test app wired to an in-process notifier.
pub struct TestApp {
    pub router: Router,
    pub notifier: Arc<RecordingNotifier>,
    pub registry: RunRegistry,
}

/// Build the full application router, exactly as `main.rs` does, but with
/// a [`RecordingNotifier`] in place of the webhook sink.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let notifier = Arc::new(RecordingNotifier::new());
    let registry = RunRegistry::new();
    let dispatcher = JobDispatcher::new(
        Arc::clone(&notifier) as Arc<dyn Notifier>,
        Arc::new(RandomMetrics),
        registry.clone(),
        config.milestone_delay(),
    );

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
        registry: registry.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        notifier,
        registry,
    }
}

/// How long tests wait for a run to reach its terminal notification.
pub const RUN_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
