use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use media_storage::StorageError;
use thiserror::Error;

use crate::models::{ErrorDetail, ErrorResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No file uploaded")]
    NoFileProvided,

    #[error("At most {max} files can be uploaded at once")]
    TooManyFiles { max: usize },

    #[error("File path is required")]
    NoPathProvided,

    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    #[error("File exceeds the {max_mb} MB limit")]
    FileTooLarge { max_mb: u64 },

    #[error("Invalid multipart body: {0}")]
    InvalidMultipart(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Authorization header with Bearer token is required")]
    MissingToken,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage upload failed. {0}")]
    UploadFailed(StorageError),

    #[error("File deletion failed. {0}")]
    DeleteFailed(StorageError),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::NoFileProvided => (StatusCode::BAD_REQUEST, "NO_FILE_PROVIDED"),
            ApiError::TooManyFiles { .. } => (StatusCode::BAD_REQUEST, "TOO_MANY_FILES"),
            ApiError::NoPathProvided => (StatusCode::BAD_REQUEST, "NO_PATH_PROVIDED"),
            ApiError::InvalidFileType(_) => (StatusCode::BAD_REQUEST, "INVALID_FILE_TYPE"),
            ApiError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE"),
            ApiError::InvalidMultipart(_) => (StatusCode::BAD_REQUEST, "INVALID_MULTIPART"),
            ApiError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "INVALID_BODY"),
            ApiError::InvalidPath(_) => (StatusCode::BAD_REQUEST, "INVALID_PATH"),
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::UploadFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "UPLOAD_FAILED"),
            ApiError::DeleteFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DELETE_FAILED"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}
