/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    120  // Covers up to three sequential storage attempts
}

pub fn max_body_size() -> usize {
    210  // Slightly above max_file_size_mb so the upload policy reports the error
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn enable_compression() -> bool {
    true
}

// Upload defaults
pub fn max_file_size_mb() -> u64 {
    200
}

pub fn max_files() -> usize {
    10
}

pub fn allowed_types() -> Vec<String> {
    [
        "image/jpeg",
        "image/png",
        "image/jpg",
        "image/webp",
        "application/pdf",
        "video/mp4",
        "video/webm",
    ]
    .iter()
    .map(|t| t.to_string())
    .collect()
}

pub fn upload_settings() -> super::models::UploadSettings {
    super::models::UploadSettings {
        max_file_size_mb: max_file_size_mb(),
        max_files: max_files(),
        allowed_types: allowed_types(),
    }
}

// Storage defaults
pub fn default_bucket() -> String {
    "uploads".to_string()
}

pub fn request_timeout_secs() -> u64 {
    30
}

pub fn s3_region() -> String {
    "ap-southeast-1".to_string()
}

pub fn s3_settings() -> super::models::S3Settings {
    super::models::S3Settings {
        endpoint_url: String::new(),
        region: s3_region(),
        access_key_id: String::new(),
        secret_access_key: String::new(),
    }
}

pub fn managed_client_kind() -> super::models::ManagedClientKind {
    super::models::ManagedClientKind::StorageApi
}

pub fn managed_settings() -> super::models::ManagedSettings {
    super::models::ManagedSettings {
        client: managed_client_kind(),
        api_url: String::new(),
        service_key: String::new(),
    }
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        public_origin: String::new(),
        default_bucket: default_bucket(),
        request_timeout_secs: request_timeout_secs(),
        s3: s3_settings(),
        managed: managed_settings(),
        bucket_aliases: Default::default(),
    }
}

// Auth defaults
pub fn auth_provider() -> super::models::AuthProvider {
    super::models::AuthProvider::Disabled
}

pub fn auth_settings() -> super::models::AuthSettings {
    super::models::AuthSettings {
        provider: auth_provider(),
        url: String::new(),
        api_key: String::new(),
        tokens: Vec::new(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# Media Server Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 3001                          # Server port

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 120                   # Request timeout in seconds (covers every storage fallback)
max_concurrent_requests = 1000       # Max simultaneous connections
max_body_size_mb = 210               # Max request body size in MB
enable_compression = true            # HTTP compression (gzip/brotli/deflate)

# CORS
allowed_origins = ["*"]              # "*" = all origins | ["https://admin.example.com"] for production

# ===============================================================================
# UPLOAD POLICY
# ===============================================================================
[uploads]
max_file_size_mb = 200               # Largest accepted file
max_files = 10                       # Files accepted by /uploads/multiple
allowed_types = ["image/jpeg", "image/png", "image/jpg", "image/webp", "application/pdf", "video/mp4", "video/webm"]

# ===============================================================================
# STORAGE
# ===============================================================================
# Strategies are tried in order: signed HTTP -> managed client -> presigned HTTP.
# A strategy without credentials is left out of the chain.
[storage]
public_origin = ""                   # Origin of public object URLs (env: MEDIA_PUBLIC_ORIGIN)
default_bucket = "uploads"           # Bucket used when a request names none
request_timeout_secs = 30            # Timeout for a single storage attempt

# S3-compatible endpoint used by the signed and presigned HTTP strategies
[storage.s3]
endpoint_url = ""                    # e.g. https://<project>.storage.example.co/storage/v1/s3 (env: MEDIA_S3_ENDPOINT)
region = "ap-southeast-1"            # Signing region (env: MEDIA_S3_REGION)
access_key_id = ""                   # env: MEDIA_S3_ACCESS_KEY
secret_access_key = ""               # env: MEDIA_S3_SECRET_KEY

# Managed storage client
[storage.managed]
client = "storage-api"               # "storage-api" (hosted REST API) or "s3-sdk" (requires --features s3)
api_url = ""                         # Defaults to public_origin
service_key = ""                     # Service-role key for the hosted API (env: MEDIA_SERVICE_KEY)

# Logical bucket -> physical bucket
[storage.bucket_aliases]
#uploads = "site-media"

# ===============================================================================
# AUTHENTICATION (required for DELETE /uploads)
# ===============================================================================
[auth]
provider = "disabled"                # "hosted" | "static" | "disabled" (disabled rejects every delete)
url = ""                             # Hosted auth origin (env: MEDIA_AUTH_URL)
api_key = ""                         # Hosted auth API key (env: MEDIA_AUTH_API_KEY)
tokens = []                          # Accepted bearer tokens when provider = "static"
"#;
