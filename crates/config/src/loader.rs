use super::defaults::DEFAULT_CONFIG_TEMPLATE;
use super::errors::ConfigError;
use super::migration::migrate_config_if_needed;
use super::models::Config;
use std::path::Path;
use std::sync::Arc;

impl Config {
    /// Loads configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_file_with_events(path, None).await
    }

    /// Loads configuration from a file with optional event bus for notifications
    pub async fn from_file_with_events<P: AsRef<Path>>(
        path: P,
        events: Option<&Arc<media_events::EventBus>>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        // Create default config if it doesn't exist
        if !path.exists() {
            create_default_config(path).await?;
        }

        migrate_config_if_needed(path, events).await?;

        let content = tokio::fs::read_to_string(path).await?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Overlays credentials and origins from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlays values from `lookup`; unset or blank values leave the file value alone.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            let value = lookup(key).filter(|v| !v.trim().is_empty());
            if value.is_some() {
                tracing::debug!("Config override from {}", key);
            }
            value
        };

        if let Some(v) = get("MEDIA_PUBLIC_ORIGIN") {
            self.storage.public_origin = v;
        }
        if let Some(v) = get("MEDIA_S3_ENDPOINT") {
            self.storage.s3.endpoint_url = v;
        }
        if let Some(v) = get("MEDIA_S3_REGION") {
            self.storage.s3.region = v;
        }
        if let Some(v) = get("MEDIA_S3_ACCESS_KEY") {
            self.storage.s3.access_key_id = v;
        }
        if let Some(v) = get("MEDIA_S3_SECRET_KEY") {
            self.storage.s3.secret_access_key = v;
        }
        if let Some(v) = get("MEDIA_SERVICE_KEY") {
            self.storage.managed.service_key = v;
        }
        if let Some(v) = get("MEDIA_AUTH_URL") {
            self.auth.url = v;
        }
        if let Some(v) = get("MEDIA_AUTH_API_KEY") {
            self.auth.api_key = v;
        }
    }

    /// Rejects settings the server cannot run with. Missing credentials are
    /// not an error: they only shorten the storage fallback chain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.default_bucket.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.default_bucket must not be empty".to_string(),
            ));
        }
        if self.uploads.max_files == 0 {
            return Err(ConfigError::InvalidConfig(
                "uploads.max_files must be at least 1".to_string(),
            ));
        }
        if let Some((logical, _)) = self
            .storage
            .bucket_aliases
            .iter()
            .find(|(_, physical)| physical.trim().is_empty())
        {
            return Err(ConfigError::InvalidConfig(format!(
                "storage.bucket_aliases.{} maps to an empty bucket name",
                logical
            )));
        }
        Ok(())
    }
}

/// Creates a default configuration file
async fn create_default_config<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
    tokio::fs::write(path, DEFAULT_CONFIG_TEMPLATE).await?;
    Ok(())
}
