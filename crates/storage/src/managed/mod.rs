mod storage_api;

#[cfg(feature = "s3")]
mod s3;

pub use storage_api::StorageApiClient;

#[cfg(feature = "s3")]
pub use s3::S3SdkClient;

use crate::StorageError;
use bytes::Bytes;

/// Options forwarded with a managed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    /// Seconds, sent as `max-age`
    pub cache_control: u32,
    /// Overwrite an existing object instead of failing
    pub upsert: bool,
}

impl UploadOptions {
    pub fn for_content_type(content_type: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            cache_control: 3600,
            upsert: false,
        }
    }
}

/// A managed object-storage client: whatever owns the heavier,
/// credentialed path to the bucket.
#[async_trait::async_trait]
pub trait ManagedStorageClient: Send + Sync {
    fn name(&self) -> &'static str;

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> Result<(), StorageError>;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError>;
}

#[cfg(test)]
pub(crate) mod memory {
    //! In-memory client that counts calls. Removing a missing object is a
    //! no-op, like the hosted storage API.

    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MemoryClient {
        objects: Mutex<HashMap<(String, String), (Bytes, UploadOptions)>>,
        pub uploads: AtomicUsize,
        pub removals: AtomicUsize,
    }

    impl MemoryClient {
        pub fn get(&self, bucket: &str, path: &str) -> Option<(Bytes, UploadOptions)> {
            self.objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), path.to_string()))
                .cloned()
        }

        pub fn upload_count(&self) -> usize {
            self.uploads.load(Ordering::SeqCst)
        }

        pub fn removal_count(&self) -> usize {
            self.removals.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ManagedStorageClient for MemoryClient {
        fn name(&self) -> &'static str {
            "memory"
        }

        async fn upload(
            &self,
            bucket: &str,
            path: &str,
            body: Bytes,
            options: &UploadOptions,
        ) -> Result<(), StorageError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            self.objects
                .lock()
                .unwrap()
                .insert((bucket.to_string(), path.to_string()), (body, options.clone()));
            Ok(())
        }

        async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
            self.removals.fetch_add(1, Ordering::SeqCst);
            let mut objects = self.objects.lock().unwrap();
            for path in paths {
                objects.remove(&(bucket.to_string(), path.clone()));
            }
            Ok(())
        }
    }
}
