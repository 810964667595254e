//! # Bookshelf Server
//!
//! Wires the catalog store, the GitHub auth gate, and the web routes into
//! one axum application.
//!
//! ## Architecture
//!
//! ```text
//! HTTP request
//!   -> NormalizePath (trailing slashes)
//!   -> TraceLayer
//!   -> auth routes   (/login, /logout, /github-callback, /login-success)
//!   -> web routes    (/, /{topic}, /{topic}/{book}, /JSON, management)
//!        -> Identity extractor (session cookie -> explicit per-request identity)
//!        -> CatalogStore queries
//!        -> askama template or JSON serializer
//! ```
//!
//! To run a server:
//!
//! ```bash
//! cargo run --bin bookshelf-server -- --addr 127.0.0.1:5000 --seed
//! ```

pub mod config;
pub mod seed;

use axum::{extract::FromRef, Router};
use std::sync::Arc;
use tower::Layer;
use tower_http::{
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use bookshelf_auth::{auth_routes, AuthState, GithubClient, SessionStore};
use bookshelf_catalog::CatalogStore;
use bookshelf_web::{web_routes, WebState};

pub use config::Config;
pub use seed::seed_demo_catalog;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Catalog store.
    pub catalog: Arc<CatalogStore>,
    /// Session store.
    pub sessions: Arc<SessionStore>,
    /// OAuth provider client.
    pub github: Arc<dyn GithubClient>,
}

impl AppState {
    /// Creates fresh stores around the given provider client.
    pub fn new(github: Arc<dyn GithubClient>) -> Self {
        Self {
            catalog: Arc::new(CatalogStore::new()),
            sessions: Arc::new(SessionStore::new()),
            github,
        }
    }
}

impl FromRef<AppState> for WebState {
    fn from_ref(app: &AppState) -> Self {
        WebState {
            catalog: app.catalog.clone(),
            sessions: app.sessions.clone(),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(app: &AppState) -> Self {
        AuthState {
            sessions: app.sessions.clone(),
            catalog: app.catalog.clone(),
            github: app.github.clone(),
        }
    }
}

/// Creates the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes::<AppState>())
        .merge(web_routes::<AppState>())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the router wrapped so paths with and without a trailing slash
/// resolve to the same handlers.
pub fn create_app(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(create_router(state))
}
