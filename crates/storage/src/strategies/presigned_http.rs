use super::{ensure_success, object_url};
use crate::signing::{presign, SigningCredentials};
use crate::strategy::{Operation, StorageRequest, StorageStrategy};
use crate::StorageError;
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;

/// Last-resort upload path: a plain PUT to a query-string presigned URL.
/// Shares the endpoint and keys with [`super::SignedHttpStrategy`] but not
/// its signer, so a header-signing problem does not take both down.
pub struct PresignedHttpStrategy {
    client: reqwest::Client,
    endpoint: String,
    credentials: SigningCredentials,
    expires_secs: u64,
}

impl PresignedHttpStrategy {
    pub const NAME: &'static str = "presigned-http";

    const DEFAULT_EXPIRES_SECS: u64 = 300;

    pub fn new(client: reqwest::Client, endpoint: String, credentials: SigningCredentials) -> Self {
        Self {
            client,
            endpoint,
            credentials,
            expires_secs: Self::DEFAULT_EXPIRES_SECS,
        }
    }
}

#[async_trait::async_trait]
impl StorageStrategy for PresignedHttpStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports(&self, operation: Operation) -> bool {
        operation == Operation::Put
    }

    async fn attempt(&self, request: &StorageRequest) -> Result<(), StorageError> {
        let StorageRequest::Put(write) = request else {
            return Err(StorageError::Unsupported {
                strategy: Self::NAME,
                operation: request.operation(),
            });
        };

        let url = object_url(&self.endpoint, &write.bucket, &write.path)?;
        let presigned = presign("PUT", &url, Utc::now(), self.expires_secs, &self.credentials);

        let response = self
            .client
            .put(presigned)
            .header(CONTENT_TYPE, write.content_type.as_str())
            .body(write.body.clone())
            .send()
            .await?;

        ensure_success(Self::NAME, response).await
    }
}
