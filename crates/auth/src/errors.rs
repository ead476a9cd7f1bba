use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization header with Bearer token is required")]
    MissingToken,

    #[error("Token rejected: {0}")]
    Rejected(String),

    #[error("Auth request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid auth configuration: {0}")]
    ConfigError(String),
}
