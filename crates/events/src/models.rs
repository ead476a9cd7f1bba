use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { signing_keys: bool, managed_client: bool },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },

    // Storage
    StorageReady { upload_chain: Vec<String>, delete_chain: Vec<String> },
    StorageNotConfigured,

    // Auth
    AuthMode { provider: String },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
