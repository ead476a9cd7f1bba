use super::{ManagedStorageClient, UploadOptions};
use crate::StorageError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, Client};
use bytes::Bytes;

/// S3 SDK client for the managed strategy.
/// Compatible with: hosted storage S3 gateways, AWS S3, Cloudflare R2, MinIO, etc.
pub struct S3SdkClient {
    client: Client,
}

impl S3SdkClient {
    pub const NAME: &'static str = "s3-sdk";

    pub async fn new(
        endpoint_url: String,
        region: String,
        access_key_id: String,
        secret_access_key: String,
    ) -> Result<Self, StorageError> {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "media-s3",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(Region::new(region))
            .endpoint_url(endpoint_url)
            .load()
            .await;

        // Path-style addressing: bucket names may contain characters that
        // are not valid in a host name.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
        })
    }
}

#[async_trait::async_trait]
impl ManagedStorageClient for S3SdkClient {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        body: Bytes,
        options: &UploadOptions,
    ) -> Result<(), StorageError> {
        tracing::debug!("s3-sdk upload {} to bucket {}", path, bucket);

        self.client
            .put_object()
            .bucket(bucket)
            .key(path)
            .content_type(options.content_type.as_str())
            .cache_control(format!("max-age={}", options.cache_control))
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StorageError::S3SdkError(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        for path in paths {
            tracing::debug!("s3-sdk delete {} from bucket {}", path, bucket);

            self.client
                .delete_object()
                .bucket(bucket)
                .key(path)
                .send()
                .await
                .map_err(|e| StorageError::S3SdkError(e.to_string()))?;
        }

        Ok(())
    }
}
