//! Auth route handlers.
//!
//! Implements the four-step gate: anonymous -> pending-authorization
//! (redirect to GitHub) -> authorized (`/github-callback` stored a token)
//! -> identified (`/login-success` resolved the numeric user id and
//! guaranteed a local user row).

use axum::{
    extract::{FromRef, Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use bookshelf_catalog::CatalogStore;

use crate::github::GithubClient;
use crate::identity::Identity;
use crate::session::{session_cookie, Flash, SessionStore};

/// Shared state for the auth routes.
#[derive(Clone)]
pub struct AuthState {
    /// Session store.
    pub sessions: Arc<SessionStore>,
    /// Catalog store, for the user table.
    pub catalog: Arc<CatalogStore>,
    /// OAuth provider client.
    pub github: Arc<dyn GithubClient>,
}

/// Creates the auth router.
pub fn auth_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AuthState: FromRef<S>,
{
    Router::new()
        .route("/login", get(login))
        .route("/logout", get(logout))
        .route("/github-callback", get(github_callback))
        .route("/login-success", get(login_success))
}

/// Queues a flash notice and redirects, creating a session (and setting its
/// cookie) when the visitor has none yet.
pub fn flash_redirect(
    sessions: &SessionStore,
    identity: &Identity,
    flash: Flash,
    to: &str,
) -> Response {
    let (session_id, is_new) = match &identity.session_id {
        Some(id) if sessions.exists(id) => (id.clone(), false),
        _ => (sessions.create(), true),
    };
    sessions.push_flash(&session_id, flash);

    let mut response = Redirect::to(to).into_response();
    if is_new {
        response
            .headers_mut()
            .insert(SET_COOKIE, session_cookie(&session_id));
    }
    response
}

/// Redirect to the GitHub authorization page, or home when the client
/// secrets are missing or the visitor is already logged in.
async fn login(State(auth): State<AuthState>, identity: Identity) -> Response {
    if !auth.github.is_configured() {
        tracing::warn!("login attempted without configured github client secrets");
        return flash_redirect(
            &auth.sessions,
            &identity,
            Flash::danger("Auth error. Please fill in GitHub's client secrets."),
            "/",
        );
    }

    if identity.token.is_some() {
        return flash_redirect(&auth.sessions, &identity, Flash::info("Already logged in."), "/");
    }

    Redirect::to(&auth.github.authorize_url()).into_response()
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
}

/// Callback handler for GitHub OAuth.
///
/// Stores the exchanged token in the session and redirects to
/// `/login-success` for identity resolution.
async fn github_callback(
    State(auth): State<AuthState>,
    identity: Identity,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Some(code) = query.code else {
        return flash_redirect(&auth.sessions, &identity, Flash::danger("Authorization failed."), "/");
    };

    let token = match auth.github.exchange_code(&code).await {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(error = %err, "github code exchange failed");
            return flash_redirect(&auth.sessions, &identity, Flash::danger("Authorization failed."), "/");
        }
    };

    let (session_id, is_new) = match &identity.session_id {
        Some(id) if auth.sessions.exists(id) => (id.clone(), false),
        _ => (auth.sessions.create(), true),
    };
    auth.sessions.set_token(&session_id, token);

    let mut response = Redirect::to("/login-success").into_response();
    if is_new {
        response
            .headers_mut()
            .insert(SET_COOKIE, session_cookie(&session_id));
    }
    response
}

/// Resolves the stored token to GitHub's numeric user id and guarantees a
/// local user row for it. Books and topics are bound to this id as owner.
async fn login_success(State(auth): State<AuthState>, identity: Identity) -> Response {
    let (Some(session_id), Some(token)) = (identity.session_id.clone(), identity.token.clone())
    else {
        return flash_redirect(&auth.sessions, &identity, Flash::danger("Authorization failed."), "/");
    };

    let github_id = match auth.github.fetch_user_id(&token).await {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(error = %err, "github user lookup failed");
            return flash_redirect(&auth.sessions, &identity, Flash::danger("Authorization failed."), "/");
        }
    };

    let user = auth.catalog.find_or_create_user(github_id);
    auth.sessions.set_github_id(&session_id, github_id);
    tracing::info!(github_id, user_id = user.id, "login successful");

    flash_redirect(&auth.sessions, &identity, Flash::success("Login successful."), "/")
}

/// Clears token and id from the session and redirects home. Does not check
/// that a visitor was actually logged in.
async fn logout(State(auth): State<AuthState>, identity: Identity) -> Response {
    if let Some(session_id) = &identity.session_id {
        auth.sessions.clear_credentials(session_id);
    }
    flash_redirect(&auth.sessions, &identity, Flash::success("Logout successful."), "/")
}
