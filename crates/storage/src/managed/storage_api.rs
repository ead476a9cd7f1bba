use super::{ManagedStorageClient, UploadOptions};
use crate::strategies::ensure_success;
use crate::StorageError;
use bytes::Bytes;
use media_utils::uri_encode;
use reqwest::header::{AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use serde::Serialize;

/// Client for the hosted storage REST API
/// (`{api}/storage/v1/object/...`), authenticated with a service key.
pub struct StorageApiClient {
    client: reqwest::Client,
    api_url: String,
    service_key: String,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

impl StorageApiClient {
    pub const NAME: &'static str = "storage-api";

    pub fn new(client: reqwest::Client, api_url: &str, service_key: String) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    fn object_endpoint(&self, bucket: &str) -> String {
        format!("{}/storage/v1/object/{}", self.api_url, uri_encode(bucket, false))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", self.service_key))
            .header("apikey", self.service_key.as_str())
    }
}

#[async_trait::async_trait]
impl ManagedStorageClient for StorageApiClient {
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
        let url = format!(
            "{}/{}",
            self.object_endpoint(bucket),
            uri_encode(path.trim_start_matches('/'), true)
        );

        tracing::debug!("storage-api upload {} ({} bytes)", url, body.len());

        let response = self
            .authorized(self.client.post(&url))
            .header(CONTENT_TYPE, options.content_type.as_str())
            .header(CACHE_CONTROL, format!("max-age={}", options.cache_control))
            .header("x-upsert", options.upsert.to_string())
            .body(body)
            .send()
            .await?;

        ensure_success(Self::NAME, response).await
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StorageError> {
        let url = self.object_endpoint(bucket);

        tracing::debug!("storage-api remove {} {:?}", url, paths);

        let response = self
            .authorized(self.client.delete(&url))
            .json(&RemoveRequest { prefixes: paths })
            .send()
            .await?;

        ensure_success(Self::NAME, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::test_server::TestServer;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_upload_request_shape() {
        let server = TestServer::start(StatusCode::OK).await;
        let client = StorageApiClient::new(
            reqwest::Client::new(),
            &format!("{}/", server.base_url),
            "service-key".to_string(),
        );

        client
            .upload(
                "media storage",
                "site/logo/123-abc.png",
                Bytes::from_static(b"img"),
                &UploadOptions::for_content_type("image/png"),
            )
            .await
            .unwrap();

        let requests = server.requests();
        let request = &requests[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/storage/v1/object/media%20storage/site/logo/123-abc.png");
        assert_eq!(request.headers["authorization"], "Bearer service-key");
        assert_eq!(request.headers["apikey"], "service-key");
        assert_eq!(request.headers["content-type"], "image/png");
        assert_eq!(request.headers["cache-control"], "max-age=3600");
        assert_eq!(request.headers["x-upsert"], "false");
        assert_eq!(request.body, b"img");
    }

    #[tokio::test]
    async fn test_remove_sends_prefix_list() {
        let server = TestServer::start(StatusCode::OK).await;
        let client = StorageApiClient::new(
            reqwest::Client::new(),
            &server.base_url,
            "service-key".to_string(),
        );

        client
            .remove("uploads", &["blog/og/999.jpg".to_string()])
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/storage/v1/object/uploads");
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body, serde_json::json!({ "prefixes": ["blog/og/999.jpg"] }));
    }

    #[tokio::test]
    async fn test_error_status_surfaces() {
        let server = TestServer::start(StatusCode::BAD_REQUEST).await;
        let client = StorageApiClient::new(
            reqwest::Client::new(),
            &server.base_url,
            "service-key".to_string(),
        );

        let err = client
            .upload("uploads", "a.png", Bytes::new(), &UploadOptions::for_content_type("image/png"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StorageError::UnexpectedStatus { strategy: "storage-api", status: 400, .. }
        ));
    }
}
