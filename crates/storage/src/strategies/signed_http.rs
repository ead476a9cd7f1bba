use super::{ensure_success, object_url};
use crate::signing::{sign_request, SignRequest, SigningCredentials};
use crate::strategy::{Operation, StorageRequest, StorageStrategy};
use crate::StorageError;
use chrono::Utc;

/// Raw HTTP call against the S3-compatible endpoint, authenticated with
/// SigV4 headers. No SDK involved.
pub struct SignedHttpStrategy {
    client: reqwest::Client,
    endpoint: String,
    credentials: SigningCredentials,
}

impl SignedHttpStrategy {
    pub const NAME: &'static str = "signed-http";

    pub fn new(client: reqwest::Client, endpoint: String, credentials: SigningCredentials) -> Self {
        Self {
            client,
            endpoint,
            credentials,
        }
    }
}

#[async_trait::async_trait]
impl StorageStrategy for SignedHttpStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports(&self, _operation: Operation) -> bool {
        true
    }

    async fn attempt(&self, request: &StorageRequest) -> Result<(), StorageError> {
        let url = object_url(&self.endpoint, request.bucket(), request.path())?;
        let now = Utc::now();

        let builder = match request {
            StorageRequest::Put(write) => {
                let headers = sign_request(
                    &SignRequest {
                        method: "PUT",
                        url: &url,
                        body: Some(&write.body[..]),
                        content_type: Some(write.content_type.as_str()),
                    },
                    now,
                    &self.credentials,
                );
                headers
                    .into_iter()
                    .fold(self.client.put(url.clone()), |b, (name, value)| b.header(name, value))
                    .body(write.body.clone())
            }
            StorageRequest::Remove(_) => {
                let headers = sign_request(
                    &SignRequest {
                        method: "DELETE",
                        url: &url,
                        body: None,
                        content_type: None,
                    },
                    now,
                    &self.credentials,
                );
                headers
                    .into_iter()
                    .fold(self.client.delete(url.clone()), |b, (name, value)| b.header(name, value))
            }
        };

        let response = builder.send().await?;
        ensure_success(Self::NAME, response).await
    }
}
