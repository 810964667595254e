//! Explicit per-request identity.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;

use crate::routes::AuthState;
use crate::session::session_id_from_headers;

/// The authenticated identity of the current request, if any.
///
/// Read once from the session cookie at the start of request handling and
/// passed into handlers as an explicit argument; there is no ambient
/// request-global state.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    /// Session id from the cookie, when the session exists server-side.
    pub session_id: Option<String>,
    /// Provider-issued OAuth token (authorized state).
    pub token: Option<String>,
    /// Resolved numeric GitHub user id (identified state).
    pub github_id: Option<u64>,
}

impl Identity {
    /// Whether the visitor holds a provider token.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthState::from_ref(state);

        let Some(session_id) = session_id_from_headers(&parts.headers) else {
            return Ok(Identity::default());
        };
        let Some(session) = auth.sessions.get(&session_id) else {
            // Stale cookie with no server-side session behind it.
            return Ok(Identity::default());
        };

        Ok(Identity {
            session_id: Some(session_id),
            token: session.token,
            github_id: session.github_id,
        })
    }
}
