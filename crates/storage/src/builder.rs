use crate::adapter::StorageAdapter;
use crate::aliases::BucketAliases;
use crate::managed::{ManagedStorageClient, StorageApiClient};
use crate::signing::SigningCredentials;
use crate::strategies::{ManagedClientStrategy, PresignedHttpStrategy, SignedHttpStrategy};
use crate::strategy::StorageStrategy;
use crate::StorageError;
use media_config::{ManagedClientKind, StorageSettings};
use std::sync::Arc;
use std::time::Duration;

/// Builds the adapter for `settings`: the shared HTTP client, the managed
/// client (if it has credentials) and the strategy chain.
pub async fn build_adapter(settings: &StorageSettings) -> Result<StorageAdapter, StorageError> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .build()?;

    let managed = build_managed_client(settings, &http).await?;
    Ok(assemble(settings, http, managed))
}

/// Creates the managed client selected in `[storage.managed]`, or `None`
/// when its credentials are missing.
pub async fn build_managed_client(
    settings: &StorageSettings,
    http: &reqwest::Client,
) -> Result<Option<Arc<dyn ManagedStorageClient>>, StorageError> {
    if !settings.has_managed_client() {
        return Ok(None);
    }

    match settings.managed.client {
        ManagedClientKind::StorageApi => {
            let client: Arc<dyn ManagedStorageClient> = Arc::new(StorageApiClient::new(
                http.clone(),
                settings.managed_api_url(),
                settings.managed.service_key.clone(),
            ));
            Ok(Some(client))
        }
        #[cfg(feature = "s3")]
        ManagedClientKind::S3Sdk => {
            let client = crate::managed::S3SdkClient::new(
                settings.s3.endpoint_url.clone(),
                settings.s3.region.clone(),
                settings.s3.access_key_id.clone(),
                settings.s3.secret_access_key.clone(),
            )
            .await?;
            let client: Arc<dyn ManagedStorageClient> = Arc::new(client);
            Ok(Some(client))
        }
        #[cfg(not(feature = "s3"))]
        ManagedClientKind::S3Sdk => Err(StorageError::ConfigError(
            "storage.managed.client = \"s3-sdk\" but S3 SDK support is not compiled. \
             Rebuild with --features s3 (requires cmake)."
                .to_string(),
        )),
    }
}

/// Orders the strategies: signed HTTP, managed client, presigned HTTP.
/// A strategy is left out when its credentials are missing.
pub fn assemble(
    settings: &StorageSettings,
    http: reqwest::Client,
    managed: Option<Arc<dyn ManagedStorageClient>>,
) -> StorageAdapter {
    let mut strategies: Vec<Arc<dyn StorageStrategy>> = Vec::new();

    let signing = settings.has_signing_keys().then(|| {
        SigningCredentials::new(
            settings.s3.access_key_id.clone(),
            settings.s3.secret_access_key.clone(),
            settings.s3.region.clone(),
        )
    });

    if let Some(credentials) = &signing {
        strategies.push(Arc::new(SignedHttpStrategy::new(
            http.clone(),
            settings.s3.endpoint_url.clone(),
            credentials.clone(),
        )));
    }

    if let Some(client) = managed {
        strategies.push(Arc::new(ManagedClientStrategy::new(client)));
    }

    if let Some(credentials) = signing {
        strategies.push(Arc::new(PresignedHttpStrategy::new(
            http,
            settings.s3.endpoint_url.clone(),
            credentials,
        )));
    }

    StorageAdapter::new(
        strategies,
        BucketAliases::new(settings.bucket_aliases.clone()),
        &settings.public_origin,
    )
}
