use crate::{AuthError, DenyAllVerifier, HostedAuthVerifier, StaticTokenVerifier, TokenVerifier};
use media_config::{AuthProvider, AuthSettings};
use std::sync::Arc;
use std::time::Duration;

const AUTH_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Picks the verifier for `[auth]`.
pub fn build_verifier(settings: &AuthSettings) -> Result<Arc<dyn TokenVerifier>, AuthError> {
    let verifier: Arc<dyn TokenVerifier> = match settings.provider {
        AuthProvider::Hosted => {
            if settings.url.trim().is_empty() || settings.api_key.is_empty() {
                return Err(AuthError::ConfigError(
                    "auth.provider = \"hosted\" requires auth.url and auth.api_key".to_string(),
                ));
            }

            let client = reqwest::Client::builder()
                .timeout(AUTH_REQUEST_TIMEOUT)
                .build()?;
            Arc::new(HostedAuthVerifier::new(
                client,
                &settings.url,
                settings.api_key.clone(),
            ))
        }
        AuthProvider::Static => {
            if settings.tokens.iter().all(|t| t.is_empty()) {
                tracing::warn!("auth.provider = \"static\" with no tokens; every delete will be rejected");
            }
            Arc::new(StaticTokenVerifier::new(settings.tokens.clone()))
        }
        AuthProvider::Disabled => Arc::new(DenyAllVerifier),
    };

    Ok(verifier)
}
