//! GitHub OAuth gate for Bookshelf.
//!
//! This crate provides:
//! - **GithubClient**: trait seam over the OAuth provider, with a reqwest
//!   implementation and a mock for tests
//! - **SessionStore**: server-side sessions holding the provider token, the
//!   resolved GitHub id, and one-shot flash notices
//! - **Identity**: explicit per-request identity, extracted once from the
//!   session cookie and passed into handlers as an argument
//! - **Auth routes**: `/login`, `/logout`, `/github-callback`,
//!   `/login-success`

mod error;
mod github;
mod identity;
pub mod mock;
mod routes;
mod session;

pub use error::{AuthError, Result};
pub use github::{GithubClient, GithubConfig, HttpGithubClient};
pub use identity::Identity;
pub use routes::{auth_routes, flash_redirect, AuthState};
pub use session::{Flash, FlashLevel, Session, SessionStore, SESSION_COOKIE};
