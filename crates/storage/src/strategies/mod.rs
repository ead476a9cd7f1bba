mod managed;
mod presigned_http;
mod signed_http;

pub use managed::ManagedClientStrategy;
pub use presigned_http::PresignedHttpStrategy;
pub use signed_http::SignedHttpStrategy;

use crate::StorageError;
use media_utils::uri_encode;
use reqwest::Url;

/// Path-style object URL: `{endpoint}/{bucket}/{path}`.
pub(crate) fn object_url(endpoint: &str, bucket: &str, path: &str) -> Result<Url, StorageError> {
    let raw = format!(
        "{}/{}/{}",
        endpoint.trim_end_matches('/'),
        uri_encode(bucket, false),
        uri_encode(path.trim_start_matches('/'), true)
    );
    Url::parse(&raw).map_err(|e| StorageError::InvalidUrl(format!("{}: {}", raw, e)))
}

/// Turns a non-2xx response into `UnexpectedStatus`, keeping a bounded
/// piece of the body for diagnostics.
pub(crate) async fn ensure_success(
    strategy: &'static str,
    response: reqwest::Response,
) -> Result<(), StorageError> {
    const MAX_BODY_CHARS: usize = 512;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(StorageError::UnexpectedStatus {
        strategy,
        status: status.as_u16(),
        body: body.chars().take(MAX_BODY_CHARS).collect(),
    })
}
