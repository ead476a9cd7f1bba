use media_auth::TokenVerifier;
use media_storage::StorageAdapter;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(crate) storage: Arc<StorageAdapter>,
    pub(crate) verifier: Arc<dyn TokenVerifier>,
    pub(crate) policy: Arc<UploadPolicy>,
    pub(crate) default_bucket: Arc<String>,
}

/// What an uploaded file must satisfy before it reaches storage.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_file_size_bytes: u64,
    pub max_files: usize,
    pub allowed_types: Vec<String>,
}
