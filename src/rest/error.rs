use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API failure taxonomy. Every variant becomes a plain `{"message": …}` body;
/// there are no structured error codes.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed identifier or no matching record.
    #[error("No such To Do")]
    NoSuchTodo,
    /// Store failure on the list operation, historically surfaced as 400.
    #[error(transparent)]
    ListQuery(anyhow::Error),
    /// Any other store failure.
    #[error(transparent)]
    Store(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NoSuchTodo => StatusCode::NOT_FOUND,
            ApiError::ListQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
