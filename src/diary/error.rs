use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::diary::models::ErrorResponse;
use crate::store::StoreError;

pub const VALIDATION_MESSAGE: &str = "Title and content are required";
pub const NOT_FOUND_MESSAGE: &str = "Diary not found";
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,

    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DiaryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DiaryError::Validation => StatusCode::BAD_REQUEST,
            DiaryError::NotFound => StatusCode::NOT_FOUND,
            DiaryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DiaryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            DiaryError::Store(e) => {
                tracing::error!(error = %e, "Storage error while handling diary request");
                INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
