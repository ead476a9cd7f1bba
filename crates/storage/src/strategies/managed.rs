use crate::managed::{ManagedStorageClient, UploadOptions};
use crate::strategy::{Operation, StorageRequest, StorageStrategy};
use crate::StorageError;
use std::sync::Arc;

/// Delegates to a managed storage client (hosted API or SDK).
pub struct ManagedClientStrategy {
    client: Arc<dyn ManagedStorageClient>,
}

impl ManagedClientStrategy {
    pub fn new(client: Arc<dyn ManagedStorageClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl StorageStrategy for ManagedClientStrategy {
    fn name(&self) -> &'static str {
        self.client.name()
    }

    fn supports(&self, _operation: Operation) -> bool {
        true
    }

    async fn attempt(&self, request: &StorageRequest) -> Result<(), StorageError> {
        match request {
            StorageRequest::Put(write) => {
                let options = UploadOptions::for_content_type(&write.content_type);
                self.client
                    .upload(&write.bucket, &write.path, write.body.clone(), &options)
                    .await
            }
            StorageRequest::Remove(target) => {
                self.client
                    .remove(&target.bucket, std::slice::from_ref(&target.path))
                    .await
            }
        }
    }
}
