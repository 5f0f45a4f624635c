use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    diary::{
        error::DiaryError,
        models::{DiaryEntry, DiaryRequest, MessageResponse},
    },
    AppState,
};

/// Parses a path segment into an entry id. Only the canonical decimal form
/// (digits, no sign, no leading zero) names an entry; anything else is
/// reported as not found.
fn parse_id(raw: &str) -> Result<i64, DiaryError> {
    let canonical = !raw.is_empty()
        && !raw.starts_with('0')
        && raw.bytes().all(|b| b.is_ascii_digit());

    match raw.parse::<i64>() {
        Ok(id) if canonical && id > 0 => Ok(id),
        _ => {
            tracing::warn!(raw_id = %raw, "Rejected malformed diary id (404)");
            Err(DiaryError::NotFound)
        }
    }
}

/// Unwraps and validates a create/update body before any storage access.
fn validate(
    payload: Result<Json<DiaryRequest>, JsonRejection>,
) -> Result<(String, String), DiaryError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection, "Unreadable diary payload (400)");
        DiaryError::Validation
    })?;

    request.validated().ok_or_else(|| {
        tracing::warn!("Diary validation failed - title or content missing (400)");
        DiaryError::Validation
    })
}

pub async fn list_diaries(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DiaryEntry>>, DiaryError> {
    let entries = state.diaries.list().await?;
    tracing::debug!(count = entries.len(), "Listed diaries");
    Ok(Json(entries))
}

pub async fn get_diary(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DiaryEntry>, DiaryError> {
    let id = parse_id(&raw_id)?;
    let entry = state.diaries.get(id).await?;
    Ok(Json(entry))
}

pub async fn create_diary(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DiaryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DiaryEntry>), DiaryError> {
    let (title, content) = validate(payload)?;

    let entry = state.diaries.create(title, content).await?;
    tracing::info!(diary_id = entry.id, "Created diary");

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_diary(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<DiaryRequest>, JsonRejection>,
) -> Result<Json<DiaryEntry>, DiaryError> {
    let (title, content) = validate(payload)?;
    let id = parse_id(&raw_id)?;

    let entry = state.diaries.update(id, title, content).await.inspect_err(|e| {
        if matches!(e, DiaryError::NotFound) {
            tracing::warn!(diary_id = id, "Update of unknown diary (404)");
        }
    })?;
    tracing::info!(diary_id = entry.id, "Updated diary");

    Ok(Json(entry))
}

pub async fn delete_diary(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, DiaryError> {
    let id = parse_id(&raw_id)?;

    state.diaries.delete(id).await.inspect_err(|e| {
        if matches!(e, DiaryError::NotFound) {
            tracing::warn!(diary_id = id, "Delete of unknown diary (404)");
        }
    })?;
    tracing::info!(diary_id = id, "Deleted diary");

    Ok(Json(MessageResponse {
        message: "Diary deleted".to_string(),
    }))
}
