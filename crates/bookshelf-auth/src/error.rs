//! Error types for the auth gate.

use thiserror::Error;

/// Errors that can occur while talking to the OAuth provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Provider client id/secret are not configured.
    #[error("github client secrets are not configured")]
    Unconfigured,

    /// The provider did not return an access token.
    #[error("authorization failed: no access token returned")]
    MissingToken,

    /// The provider rejected a request or returned an unusable response.
    #[error("provider error: {0}")]
    Provider(String),

    /// Transport-level failure talking to the provider.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
