use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;

use mechacrew_api::config::ServerConfig;
use mechacrew_api::router::build_app_router;
use mechacrew_api::state::AppState;
use mechacrew_api::store::presence::PresenceRoster;
use mechacrew_api::store::voting::VotingStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, without
/// external collaborators (no database, no generation client).
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses, while the voting engine and
/// presence roster run fully in memory.
pub fn build_test_app() -> Router {
    let config = test_config();

    let state = AppState {
        pool: None,
        config: Arc::new(config.clone()),
        voting: Arc::new(VotingStore::new()),
        presence: Arc::new(PresenceRoster::new()),
        generator: None,
    };

    build_app_router(state, &config)
}

/// Build a JSON request.
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// Build a bodyless GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

/// Collect a response body into JSON.
pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}
