pub mod config;
pub mod database;
pub mod diary;
pub mod logging;
pub mod store;

pub use config::Config;
pub use database::{connect_diary_store, create_pool, create_redis_client};
pub use diary::DiaryStore;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub diaries: DiaryStore,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let diary_routes = Router::new()
        .route(
            "/diaries",
            get(diary::handlers::list_diaries).post(diary::handlers::create_diary),
        )
        .route(
            "/diaries/{id}",
            get(diary::handlers::get_diary)
                .put(diary::handlers::update_diary)
                .delete(diary::handlers::delete_diary),
        );

    Router::new()
        .route("/", get(root))
        .merge(diary_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Diary Service API - v0.1.0"
}
