mod builder;
mod errors;
mod models;
mod verifiers;

pub use builder::build_verifier;
pub use errors::AuthError;
pub use models::{AuthUser, TokenVerifier};
pub use verifiers::{DenyAllVerifier, HostedAuthVerifier, StaticTokenVerifier};
