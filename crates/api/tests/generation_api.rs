//! End-to-end tests for the generation endpoint.
//!
//! The test app has no generation client configured, so requests take the
//! fallback path; the external API is never contacted.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{build_test_app, json_request, response_json};

#[tokio::test]
async fn test_generate_without_client_serves_fallback() {
    let app = build_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({ "command": "add a plasma cannon", "sessionId": "s1", "userId": "u1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["fallback"], json!(true));
    assert_eq!(body["component"]["name"], json!("Emergency Component"));
    assert_eq!(body["component"]["type"], json!("weapon"));
    assert!(body["component"]["id"]
        .as_str()
        .unwrap()
        .starts_with("fallback-"));
    assert!(body["component"]["description"]
        .as_str()
        .unwrap()
        .contains("add a plasma cannon"));
}

#[tokio::test]
async fn test_generate_requires_command() {
    let app = build_test_app();

    let response = app
        .oneshot(json_request("POST", "/api/generate", json!({ "command": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}
