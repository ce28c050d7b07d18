#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use workshop_api::config::{LogFormat, ServerConfig};
use workshop_api::router::build_app_router;
use workshop_api::state::AppState;
use workshop_events::TopicBus;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_concurrent_requests: 64,
        database_url: None,
        topics: vec![
            "greetings".to_string(),
            "user-events".to_string(),
            "movie-events".to_string(),
        ],
        log_format: LogFormat::Text,
    }
}

/// Build application state over empty in-memory repositories.
pub fn test_state() -> AppState {
    let config = test_config();
    let topics = Arc::new(TopicBus::new(config.topics.clone(), 64).unwrap());
    AppState::in_memory(Arc::new(config), topics)
}

/// Build the full application router with all middleware layers.
///
/// The returned router is cheap to clone; clones share the same state, so
/// a test can issue several requests against one store.
pub fn build_test_app() -> Router {
    build_test_app_with(test_state())
}

pub fn build_test_app_with(state: AppState) -> Router {
    let config = test_config();
    build_app_router(state, &config)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(app: &Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
