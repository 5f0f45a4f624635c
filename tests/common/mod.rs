use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use diary_service::{create_router, AppState, DiaryStore};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
pub fn spawn_app_with(diaries: DiaryStore) -> TestApp {
    let state = Arc::new(AppState { diaries });

    TestApp {
        router: create_router(state.clone()),
        state,
    }
}

/// App over a fresh in-memory table.
pub fn spawn_app() -> TestApp {
    spawn_app_with(DiaryStore::in_memory())
}

#[allow(dead_code)]
impl TestApp {
    /// Sends one request and returns the status plus the body parsed as
    /// JSON (`Value::Null` for an empty or non-JSON body).
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().uri(uri).method(method);
        let request = match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    /// Creates an entry through the API and returns its id.
    pub async fn create(&self, title: &str, content: &str) -> i64 {
        let (status, body) = self
            .send(
                "POST",
                "/diaries",
                Some(serde_json::json!({ "title": title, "content": content })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "unexpected create response: {body}");
        body["id"].as_i64().expect("created entry has a numeric id")
    }
}
