//! GitHub OAuth provider client.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::{AuthError, Result};

const AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const ACCESS_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const USER_API_URL: &str = "https://api.github.com/user";

/// GitHub OAuth application credentials.
///
/// Empty strings mean "unconfigured"; the login route then bounces home
/// with a notice instead of redirecting to the provider.
#[derive(Debug, Clone, Default)]
pub struct GithubConfig {
    /// OAuth application client id.
    pub client_id: String,
    /// OAuth application client secret.
    pub client_secret: String,
}

impl GithubConfig {
    /// Whether both client id and secret are present.
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// Seam over the external OAuth provider.
///
/// The handshake reduces to three operations: building the authorization
/// redirect URL, exchanging the callback code for an access token, and
/// resolving the token to the provider's numeric user id.
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Whether provider credentials are configured.
    fn is_configured(&self) -> bool;

    /// URL of the provider's authorization page.
    fn authorize_url(&self) -> String;

    /// Exchanges a callback `code` for an access token.
    async fn exchange_code(&self, code: &str) -> Result<String>;

    /// Resolves `token` to the provider's numeric user id ("who am I").
    async fn fetch_user_id(&self, token: &str) -> Result<u64>;
}

/// [`GithubClient`] backed by reqwest against the real GitHub endpoints.
#[derive(Debug, Clone)]
pub struct HttpGithubClient {
    config: GithubConfig,
    http: reqwest::Client,
}

impl HttpGithubClient {
    /// Creates a client for the given credentials.
    pub fn new(config: GithubConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccessTokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: u64,
}

#[async_trait]
impl GithubClient for HttpGithubClient {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn authorize_url(&self) -> String {
        format!("{AUTHORIZE_URL}?client_id={}", self.config.client_id)
    }

    async fn exchange_code(&self, code: &str) -> Result<String> {
        if !self.is_configured() {
            return Err(AuthError::Unconfigured);
        }

        let response: AccessTokenResponse = self
            .http
            .post(ACCESS_TOKEN_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.access_token.ok_or(AuthError::MissingToken)
    }

    async fn fetch_user_id(&self, token: &str) -> Result<u64> {
        let response = self
            .http
            .get(USER_API_URL)
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .header(reqwest::header::USER_AGENT, "bookshelf")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AuthError::Provider(format!(
                "user lookup returned {}",
                response.status()
            )));
        }

        let user: UserResponse = response.json().await?;
        Ok(user.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_requires_both_secrets() {
        assert!(!GithubConfig::default().is_configured());
        assert!(!GithubConfig {
            client_id: "id".into(),
            client_secret: String::new(),
        }
        .is_configured());
        assert!(GithubConfig {
            client_id: "id".into(),
            client_secret: "secret".into(),
        }
        .is_configured());
    }

    #[test]
    fn test_authorize_url_carries_client_id() {
        let client = HttpGithubClient::new(GithubConfig {
            client_id: "abc123".into(),
            client_secret: "shh".into(),
        });
        assert_eq!(
            client.authorize_url(),
            "https://github.com/login/oauth/authorize?client_id=abc123"
        );
    }
}
