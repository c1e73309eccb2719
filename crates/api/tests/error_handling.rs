//! Error mapping tests: AppError -> HTTP status + `{error, code}` body,
//! plus the 503 surface for endpoints that need an unconfigured database.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use tower::ServiceExt;

use mechacrew_api::error::AppError;
use mechacrew_core::error::CoreError;
use mechacrew_core::voting::VotingError;

use common::{build_test_app, get_request, json_request, response_json};

// ---------------------------------------------------------------------------
// AppError -> response mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_not_found_maps_to_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Session",
        id: "session-42".to_string(),
    });
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("NOT_FOUND"));
    assert!(body["error"].as_str().unwrap().contains("session-42"));
}

#[tokio::test]
async fn test_validation_maps_to_400() {
    let err = AppError::Core(CoreError::Validation("Message must not be empty".into()));
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_duplicate_vote_maps_to_400_with_own_code() {
    let err = AppError::Voting(VotingError::DuplicateVote {
        voter_id: "alice".into(),
    });
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("DUPLICATE_VOTE"));
    assert!(body["error"].as_str().unwrap().contains("alice"));
}

#[tokio::test]
async fn test_collaborator_unavailable_maps_to_503() {
    let err = AppError::CollaboratorUnavailable("Database");
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("COLLABORATOR_UNAVAILABLE"));
}

#[tokio::test]
async fn test_internal_error_is_sanitized() {
    let err = AppError::InternalError("secret connection string leaked".into());
    let response = err.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("INTERNAL_ERROR"));
    assert_eq!(body["error"], json!("An internal error occurred"));
}

// ---------------------------------------------------------------------------
// Endpoints that need the database answer 503 when it is not configured
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sessions_unavailable_without_database() {
    let app = build_test_app();

    let response = app.oneshot(get_request("/api/sessions")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("COLLABORATOR_UNAVAILABLE"));
}

#[tokio::test]
async fn test_chat_unavailable_without_database() {
    let app = build_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/chat/messages",
            json!({
                "sessionId": "s1",
                "userId": "u1",
                "userName": "Asuka",
                "message": "hello",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = response_json(response).await;
    assert_eq!(body["code"], json!("COLLABORATOR_UNAVAILABLE"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = build_test_app();

    let response = app.oneshot(get_request("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
