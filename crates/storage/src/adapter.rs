use crate::aliases::BucketAliases;
use crate::strategy::{ObjectRef, ObjectWrite, Operation, StorageRequest, StorageStrategy};
use crate::StorageError;
use bytes::Bytes;
use media_utils::uri_encode;
use std::sync::Arc;

/// Outcome of a successful `put`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub url: String,
    /// Physical bucket the object was written to
    pub bucket: String,
    pub path: String,
    /// Strategy that performed the write
    pub strategy: &'static str,
}

enum ChainFailure {
    NotConfigured,
    Exhausted(StorageError),
}

/// Uploads and deletes objects through an ordered list of strategies.
///
/// Strategies run one at a time; the first success wins and every failure
/// before it is logged and dropped. Only when the list is exhausted does the
/// caller see an error, wrapping the last strategy's failure.
pub struct StorageAdapter {
    strategies: Vec<Arc<dyn StorageStrategy>>,
    aliases: BucketAliases,
    public_origin: String,
}

impl StorageAdapter {
    pub fn new(
        strategies: Vec<Arc<dyn StorageStrategy>>,
        aliases: BucketAliases,
        public_origin: &str,
    ) -> Self {
        Self {
            strategies,
            aliases,
            public_origin: public_origin.trim_end_matches('/').to_string(),
        }
    }

    /// Names of the strategies that would run for `operation`, in order.
    pub fn chain(&self, operation: Operation) -> Vec<&'static str> {
        self.strategies_for(operation).map(|s| s.name()).collect()
    }

    pub fn is_configured(&self, operation: Operation) -> bool {
        self.strategies_for(operation).next().is_some()
    }

    pub fn physical_bucket<'a>(&'a self, bucket: &'a str) -> &'a str {
        self.aliases.resolve(bucket)
    }

    /// Public URL of an object in a physical bucket. Built locally; the
    /// backend is never asked.
    pub fn public_url(&self, physical_bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.public_origin,
            uri_encode(physical_bucket, false),
            uri_encode(path, true)
        )
    }

    pub async fn put(
        &self,
        bucket: &str,
        path: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<UploadResult, StorageError> {
        let path = normalize_path(path)?;
        let bucket = self.physical_bucket(bucket).to_string();
        check_bucket(&bucket)?;

        let request = StorageRequest::Put(ObjectWrite {
            bucket: bucket.clone(),
            path: path.to_string(),
            body,
            content_type: content_type.to_string(),
        });

        match self.execute(&request).await {
            Ok(strategy) => Ok(UploadResult {
                url: self.public_url(&bucket, path),
                bucket,
                path: path.to_string(),
                strategy,
            }),
            Err(ChainFailure::NotConfigured) => Err(StorageError::NotConfigured),
            Err(ChainFailure::Exhausted(last)) => Err(StorageError::UploadFailed {
                path: path.to_string(),
                source: Box::new(last),
            }),
        }
    }

    /// Best effort: whether deleting a missing object succeeds depends on
    /// which backend ends up serving the call.
    pub async fn remove(&self, bucket: &str, path: &str) -> Result<(), StorageError> {
        let path = normalize_path(path)?;
        let bucket = self.physical_bucket(bucket);
        check_bucket(bucket)?;
        let request = StorageRequest::Remove(ObjectRef {
            bucket: bucket.to_string(),
            path: path.to_string(),
        });

        match self.execute(&request).await {
            Ok(_) => Ok(()),
            Err(ChainFailure::NotConfigured) => Err(StorageError::NotConfigured),
            Err(ChainFailure::Exhausted(last)) => Err(StorageError::DeleteFailed {
                path: path.to_string(),
                source: Box::new(last),
            }),
        }
    }

    fn strategies_for(&self, operation: Operation) -> impl Iterator<Item = &Arc<dyn StorageStrategy>> {
        self.strategies.iter().filter(move |s| s.supports(operation))
    }

    async fn execute(&self, request: &StorageRequest) -> Result<&'static str, ChainFailure> {
        let operation = request.operation();
        let mut last_error = None;

        for strategy in self.strategies_for(operation) {
            match strategy.attempt(request).await {
                Ok(()) => {
                    tracing::info!(
                        strategy = strategy.name(),
                        bucket = request.bucket(),
                        path = request.path(),
                        "{:?} succeeded",
                        operation
                    );
                    return Ok(strategy.name());
                }
                Err(e) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        bucket = request.bucket(),
                        path = request.path(),
                        error = %e,
                        "{:?} failed, trying next strategy",
                        operation
                    );
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => {
                tracing::error!(
                    bucket = request.bucket(),
                    path = request.path(),
                    "{:?} failed on every strategy",
                    operation
                );
                Err(ChainFailure::Exhausted(e))
            }
            None => Err(ChainFailure::NotConfigured),
        }
    }
}

/// Strips leading slashes and rejects paths a URL parser would rewrite.
fn normalize_path(path: &str) -> Result<&str, StorageError> {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return Err(StorageError::InvalidPath("object path is empty".to_string()));
    }
    if path.contains('\0') {
        return Err(StorageError::InvalidPath(format!("'{}' contains a null byte", path)));
    }
    if path.split('/').any(is_dot_segment) {
        return Err(StorageError::InvalidPath(format!(
            "'{}' contains '.' or '..' segments",
            path
        )));
    }
    Ok(path)
}

fn check_bucket(bucket: &str) -> Result<(), StorageError> {
    if bucket.is_empty() || is_dot_segment(bucket) || bucket.contains('\0') {
        return Err(StorageError::InvalidPath(format!("invalid bucket name '{}'", bucket)));
    }
    Ok(())
}

fn is_dot_segment(segment: &str) -> bool {
    segment == "." || segment == ".."
}
