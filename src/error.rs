//! Error taxonomy for catalog lookups, model calls and the HTTP boundary.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failures of the problem directory client.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Error fetching LeetCode data: {0}")]
    Fetch(String),

    #[error("Question not found. Please ensure the question number is correct.")]
    NotFound(u32),

    #[error("Catalog returned an unknown difficulty tier: {0}")]
    InvalidDifficulty(i64),
}

/// Failures of the advice generator. The caller decides what to show instead.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("text generation is not configured (MODEL_API_KEY unset)")]
    NotConfigured,

    #[error("model request failed: {0}")]
    Transport(String),

    #[error("model HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("could not decode model response: {0}")]
    Decode(String),

    #[error("model returned no text")]
    Empty,
}

/// Errors surfaced by the HTTP and WebSocket handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Directory(DirectoryError::NotFound(_)) => "NOT_FOUND",
            Self::Directory(DirectoryError::Fetch(_)) => "FETCH_ERROR",
            Self::Directory(DirectoryError::InvalidDifficulty(_)) => "INVALID_DIFFICULTY",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Directory(DirectoryError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Directory(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn details(&self) -> ErrorDetails {
        ErrorDetails {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

// Extractor failures share the JSON error envelope instead of axum's plain-text body.
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(target: "leetmate", code = self.error_code(), error = %self, "Request failed upstream");
        }
        (status, Json(ErrorResponse { error: self.details() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_fetch_map_to_distinct_statuses() {
        let nf = AppError::from(DirectoryError::NotFound(7));
        let fe = AppError::from(DirectoryError::Fetch("HTTP 500".into()));
        assert_eq!(nf.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(fe.status_code(), StatusCode::BAD_GATEWAY);
        assert_ne!(nf.error_code(), fe.error_code());
    }

    #[test]
    fn invalid_difficulty_is_reported_like_a_fetch_failure() {
        let e = AppError::from(DirectoryError::InvalidDifficulty(9));
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(e.error_code(), "INVALID_DIFFICULTY");
    }

    #[test]
    fn not_found_message_matches_user_facing_text() {
        assert_eq!(
            DirectoryError::NotFound(12).to_string(),
            "Question not found. Please ensure the question number is correct."
        );
    }
}
