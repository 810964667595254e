//! Mock GitHub client for tests.

use async_trait::async_trait;

use crate::error::{AuthError, Result};
use crate::github::GithubClient;

/// [`GithubClient`](crate::GithubClient) returning canned responses.
///
/// The default instance accepts any code, hands out `mock-token`, and
/// resolves it to user id 1000.
#[derive(Debug, Clone)]
pub struct MockGithubClient {
    /// Numeric user id returned by `fetch_user_id`.
    pub user_id: u64,
    /// Whether the mock reports credentials as configured.
    pub configured: bool,
    /// Whether the code exchange fails (provider declined).
    pub fail_exchange: bool,
}

impl MockGithubClient {
    /// Creates a mock that succeeds for user id 1000.
    pub fn new() -> Self {
        Self {
            user_id: 1000,
            configured: true,
            fail_exchange: false,
        }
    }

    /// Creates a mock resolving to the given user id.
    pub fn with_user_id(user_id: u64) -> Self {
        Self {
            user_id,
            ..Self::new()
        }
    }

    /// Creates a mock with no configured credentials.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Creates a mock whose code exchange fails.
    pub fn failing_exchange() -> Self {
        Self {
            fail_exchange: true,
            ..Self::new()
        }
    }
}

impl Default for MockGithubClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GithubClient for MockGithubClient {
    fn is_configured(&self) -> bool {
        self.configured
    }

    fn authorize_url(&self) -> String {
        "https://github.example/oauth/authorize?client_id=mock".to_string()
    }

    async fn exchange_code(&self, _code: &str) -> Result<String> {
        if self.fail_exchange {
            return Err(AuthError::MissingToken);
        }
        Ok("mock-token".to_string())
    }

    async fn fetch_user_id(&self, token: &str) -> Result<u64> {
        if token != "mock-token" {
            return Err(AuthError::Provider("unknown token".to_string()));
        }
        Ok(self.user_id)
    }
}
