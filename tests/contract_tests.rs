use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use diary_service::diary::models::{DiaryEntry, DiaryRequest, ErrorResponse};
use serde_json::json;
use tower::ServiceExt;

mod common;

#[test]
fn test_diary_entry_contract() {
    let entry = DiaryEntry {
        id: 7,
        title: "Test Title".to_string(),
        content: "Test Content".to_string(),
    };

    let json_val = serde_json::to_value(&entry).expect("Failed to serialize");

    // exactly {id, title, content}, nothing else
    assert_eq!(
        json_val,
        json!({"id": 7, "title": "Test Title", "content": "Test Content"})
    );
}

#[test]
fn test_diary_request_ignores_unknown_fields() {
    let json_data = json!({
        "title": "Test Title",
        "content": "Test Content",
        "id": 12345,
        "mood": "happy"
    });

    let request: DiaryRequest =
        serde_json::from_value(json_data).expect("Failed to deserialize DiaryRequest");

    assert_eq!(
        request.validated(),
        Some(("Test Title".to_string(), "Test Content".to_string()))
    );
}

async fn error_body(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_validation_error_body_contract() {
    let app = common::spawn_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/diaries")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"title":"Test Title"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, json_val) = error_body(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    // the whole body is the single error field
    assert_eq!(json_val, json!({"error": "Title and content are required"}));
    let body: ErrorResponse = serde_json::from_value(json_val).unwrap();
    assert_eq!(body.error, "Title and content are required");
}

#[tokio::test]
async fn test_not_found_error_body_contract() {
    let app = common::spawn_app();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/diaries/10000")
                .method("DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let (status, json_val) = error_body(response).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_val, json!({"error": "Diary not found"}));
    let body: ErrorResponse = serde_json::from_value(json_val).unwrap();
    assert_eq!(body.error, "Diary not found");
}
