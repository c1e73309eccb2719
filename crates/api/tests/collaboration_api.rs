//! End-to-end tests for the collaboration (presence) endpoints.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{build_test_app, get_request, json_request, response_json};

#[tokio::test]
async fn test_join_and_list_users() {
    let app = build_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/collaboration/join",
            json!({ "userId": "u1", "userName": "Asuka" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["user"]["id"], json!("u1"));
    assert_eq!(body["user"]["name"], json!("Asuka"));
    assert_eq!(body["user"]["isActive"], json!(true));
    // Default color assigned when none supplied.
    assert!(body["user"]["color"].is_string());

    let users = app
        .oneshot(get_request("/api/collaboration/users"))
        .await
        .unwrap();
    let users = response_json(users).await;
    assert_eq!(users["users"].as_array().unwrap().len(), 1);
    assert_eq!(users["users"][0]["id"], json!("u1"));
}

#[tokio::test]
async fn test_join_requires_user_name() {
    let app = build_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/collaboration/join",
            json!({ "userId": "u1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_update_position() {
    let app = build_test_app();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/collaboration/join",
            json!({ "userId": "u1", "userName": "Asuka" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/collaboration/position",
            json!({ "userId": "u1", "position": [1.5, 0.0, -2.0] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let users = app
        .oneshot(get_request("/api/collaboration/users"))
        .await
        .unwrap();
    let users = response_json(users).await;
    assert_eq!(users["users"][0]["position"], json!([1.5, 0.0, -2.0]));
}

#[tokio::test]
async fn test_update_position_for_unknown_user_is_404() {
    let app = build_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/collaboration/position",
            json!({ "userId": "ghost", "position": [0.0, 0.0, 0.0] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn test_leave_removes_user() {
    let app = build_test_app();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/collaboration/join",
            json!({ "userId": "u1", "userName": "Asuka" }),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/collaboration/leave",
            json!({ "userId": "u1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let users = app
        .oneshot(get_request("/api/collaboration/users"))
        .await
        .unwrap();
    let users = response_json(users).await;
    assert_eq!(users["users"], json!([]));
}

#[tokio::test]
async fn test_leave_is_idempotent() {
    let app = build_test_app();

    // Leaving without having joined still succeeds.
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/collaboration/leave",
            json!({ "userId": "nobody" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
}
