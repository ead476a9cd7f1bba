use crate::strategy::Operation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No storage strategy is configured for this operation")]
    NotConfigured,

    #[error("Upload failed for '{path}': {source}")]
    UploadFailed {
        path: String,
        #[source]
        source: Box<StorageError>,
    },

    #[error("Delete failed for '{path}': {source}")]
    DeleteFailed {
        path: String,
        #[source]
        source: Box<StorageError>,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{strategy} returned status {status}: {body}")]
    UnexpectedStatus {
        strategy: &'static str,
        status: u16,
        body: String,
    },

    #[error("{strategy} does not support {operation:?}")]
    Unsupported {
        strategy: &'static str,
        operation: Operation,
    },

    #[error("Invalid object URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid object path: {0}")]
    InvalidPath(String),

    #[error("Invalid storage configuration: {0}")]
    ConfigError(String),

    #[cfg(feature = "s3")]
    #[error("S3 SDK error: {0}")]
    S3SdkError(String),
}
