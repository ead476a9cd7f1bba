use crate::AuthError;
use serde::{Deserialize, Serialize};

/// The caller behind a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Checks a bearer token and resolves the user it belongs to.
#[async_trait::async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Provider name shown at start-up
    fn name(&self) -> &'static str;

    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError>;
}
