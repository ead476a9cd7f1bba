use crate::{AuthError, AuthUser, TokenVerifier};
use reqwest::header::AUTHORIZATION;

/// Asks the hosted auth service who owns the token
/// (`GET {url}/auth/v1/user`).
pub struct HostedAuthVerifier {
    client: reqwest::Client,
    user_endpoint: String,
    api_key: String,
}

impl HostedAuthVerifier {
    pub fn new(client: reqwest::Client, url: &str, api_key: String) -> Self {
        Self {
            client,
            user_endpoint: format!("{}/auth/v1/user", url.trim_end_matches('/')),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for HostedAuthVerifier {
    fn name(&self) -> &'static str {
        "hosted"
    }

    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .client
            .get(&self.user_endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header("apikey", self.api_key.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Auth service rejected token with status {}", status);
            return Err(AuthError::Rejected(format!("auth service returned {}", status)));
        }

        Ok(response.json::<AuthUser>().await?)
    }
}

/// Accepts a fixed list of tokens. Meant for local deployments and tests.
pub struct StaticTokenVerifier {
    tokens: Vec<String>,
}

impl StaticTokenVerifier {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens: tokens.into_iter().filter(|t| !t.is_empty()).collect(),
        }
    }
}

#[async_trait::async_trait]
impl TokenVerifier for StaticTokenVerifier {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn verify(&self, token: &str) -> Result<AuthUser, AuthError> {
        match self.tokens.iter().position(|t| t == token) {
            Some(index) => Ok(AuthUser {
                id: format!("static-{}", index),
                email: None,
            }),
            None => Err(AuthError::Rejected("unknown token".to_string())),
        }
    }
}

/// Rejects everything.
pub struct DenyAllVerifier;

#[async_trait::async_trait]
impl TokenVerifier for DenyAllVerifier {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn verify(&self, _token: &str) -> Result<AuthUser, AuthError> {
        Err(AuthError::Rejected("authentication is not configured".to_string()))
    }
}
