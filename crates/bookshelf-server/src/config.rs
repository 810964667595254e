//! Server configuration.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the Bookshelf server.
///
/// Loaded from a YAML file when one exists; the `GITHUB_CLIENT_ID` and
/// `GITHUB_CLIENT_SECRET` environment variables override the file. Both
/// credentials empty means the login route bounces home with a notice
/// instead of starting the OAuth handshake.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// GitHub OAuth application client id.
    pub github_client_id: String,
    /// GitHub OAuth application client secret.
    pub github_client_secret: String,
}

impl Config {
    /// Loads the config file at `path`, falling back to defaults when the
    /// file does not exist, then applies environment overrides.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_yaml::from_str(&raw)
                .with_context(|| format!("failed to parse {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(id) = std::env::var("GITHUB_CLIENT_ID") {
            config.github_client_id = id;
        }
        if let Ok(secret) = std::env::var("GITHUB_CLIENT_SECRET") {
            config.github_client_secret = secret;
        }

        Ok(config)
    }
}
