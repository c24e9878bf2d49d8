use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
    Json,
};
use bookvote_types::ValidationError;
use http::StatusCode;
use serde_json::json;
use tracing::{debug, error};

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Multipart error: {0}")]
    MultipartError(#[from] MultipartError),

    #[error("Invalid JSON: {0}")]
    JsonRejection(#[from] JsonRejection),
}

impl From<bookvote_dal::Error> for ApiError {
    fn from(value: bookvote_dal::Error) -> Self {
        use bookvote_dal::Error;
        match value {
            Error::RecordNotFound(what) => ApiError::ResourceNotFound(what),
            Error::InvalidInput(msg) => ApiError::InvalidRequest(msg),
            Error::DuplicateVote { .. } => ApiError::Conflict(value.to_string()),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

/// Book ids are numeric, anything else in path cannot name existing book
impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        debug!("Invalid path: {value}");
        ApiError::ResourceNotFound("Book".to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        ApiError::InvalidRequest(value.to_string())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MultipartError(e) => e.status(),
            ApiError::JsonRejection(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::InternalError(msg) => {
                error!("Internal error: {msg}");
                "Internal server error".to_string()
            }
            ApiError::InvalidRequest(msg)
            | ApiError::ResourceNotFound(msg)
            | ApiError::Conflict(msg) => msg,
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
