use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerSettings,
    #[serde(default = "super::defaults::upload_settings")]
    pub uploads: UploadSettings,
    #[serde(default = "super::defaults::storage_settings")]
    pub storage: StorageSettings,
    #[serde(default = "super::defaults::auth_settings")]
    pub auth: AuthSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::max_body_size")]
    pub max_body_size_mb: usize,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::enable_compression")]
    pub enable_compression: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadSettings {
    #[serde(default = "super::defaults::max_file_size_mb")]
    pub max_file_size_mb: u64,
    #[serde(default = "super::defaults::max_files")]
    pub max_files: usize,
    #[serde(default = "super::defaults::allowed_types")]
    pub allowed_types: Vec<String>,
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Origin that public object URLs are built from.
    #[serde(default)]
    pub public_origin: String,
    #[serde(default = "super::defaults::default_bucket")]
    pub default_bucket: String,
    #[serde(default = "super::defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "super::defaults::s3_settings")]
    pub s3: S3Settings,
    #[serde(default = "super::defaults::managed_settings")]
    pub managed: ManagedSettings,
    /// Logical bucket name -> physical bucket name.
    #[serde(default)]
    pub bucket_aliases: BTreeMap<String, String>,
}

impl StorageSettings {
    /// Whether the raw signed-HTTP strategies can run.
    pub fn has_signing_keys(&self) -> bool {
        !self.s3.endpoint_url.trim().is_empty()
            && !self.s3.access_key_id.is_empty()
            && !self.s3.secret_access_key.is_empty()
    }

    /// Base URL of the hosted storage API; falls back to the public origin.
    pub fn managed_api_url(&self) -> &str {
        if self.managed.api_url.trim().is_empty() {
            &self.public_origin
        } else {
            &self.managed.api_url
        }
    }

    pub fn has_managed_client(&self) -> bool {
        match self.managed.client {
            ManagedClientKind::StorageApi => {
                !self.managed.service_key.is_empty() && !self.managed_api_url().trim().is_empty()
            }
            ManagedClientKind::S3Sdk => self.has_signing_keys(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Settings {
    #[serde(default)]
    pub endpoint_url: String,
    #[serde(default = "super::defaults::s3_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: String,
    #[serde(default)]
    pub secret_access_key: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ManagedClientKind {
    StorageApi,
    S3Sdk,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManagedSettings {
    #[serde(default = "super::defaults::managed_client_kind")]
    pub client: ManagedClientKind,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub service_key: String,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Hosted,
    Static,
    Disabled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default = "super::defaults::auth_provider")]
    pub provider: AuthProvider,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub tokens: Vec<String>,
}
