use super::models::{AppState, UploadPolicy};
use media_auth::TokenVerifier;
use media_config::UploadSettings;
use media_storage::StorageAdapter;
use std::sync::Arc;

impl AppState {
    pub fn new(
        storage: Arc<StorageAdapter>,
        verifier: Arc<dyn TokenVerifier>,
        uploads: &UploadSettings,
        default_bucket: String,
    ) -> Self {
        Self {
            storage,
            verifier,
            policy: Arc::new(UploadPolicy::from(uploads)),
            default_bucket: Arc::new(default_bucket),
        }
    }
}

impl From<&UploadSettings> for UploadPolicy {
    fn from(settings: &UploadSettings) -> Self {
        Self {
            max_file_size_bytes: settings.max_file_size_bytes(),
            max_files: settings.max_files,
            allowed_types: settings.allowed_types.clone(),
        }
    }
}

impl UploadPolicy {
    pub fn allows(&self, mimetype: &str) -> bool {
        self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(mimetype))
    }

    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_bytes / (1024 * 1024)
    }
}
