//! Server-side session storage and flash notices.

use axum::http::{header::COOKIE, HeaderMap, HeaderValue};
use parking_lot::RwLock;
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "bookshelf_session";

/// Length of a generated session id.
const SESSION_ID_LEN: usize = 32;

/// Severity of a flash notice, mirroring the levels the templates style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    /// Operation succeeded.
    Success,
    /// Informational notice.
    Info,
    /// Something went wrong.
    Danger,
}

impl FlashLevel {
    /// CSS-friendly lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Info => "info",
            FlashLevel::Danger => "danger",
        }
    }
}

/// One-shot notice shown on the next rendered page, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    /// Severity.
    pub level: FlashLevel,
    /// User-facing message.
    pub message: String,
}

impl Flash {
    /// Success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }

    /// Failure notice.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

/// Per-visitor session state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Provider-issued OAuth token, once authorized.
    pub token: Option<String>,
    /// Resolved numeric GitHub user id, once identified.
    pub github_id: Option<u64>,
    /// Pending one-shot notice.
    pub flash: Option<Flash>,
}

/// Thread-safe in-memory session store keyed by opaque cookie ids.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    /// Creates a new empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session and returns its id.
    pub fn create(&self) -> String {
        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_ID_LEN)
            .map(char::from)
            .collect();
        self.sessions.write().insert(id.clone(), Session::default());
        id
    }

    /// Whether a session with this id exists.
    pub fn exists(&self, id: &str) -> bool {
        self.sessions.read().contains_key(id)
    }

    /// Gets a snapshot of a session.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions.read().get(id).cloned()
    }

    /// Stores the provider token in a session.
    pub fn set_token(&self, id: &str, token: impl Into<String>) {
        if let Some(session) = self.sessions.write().get_mut(id) {
            session.token = Some(token.into());
        }
    }

    /// Stores the resolved GitHub id in a session.
    pub fn set_github_id(&self, id: &str, github_id: u64) {
        if let Some(session) = self.sessions.write().get_mut(id) {
            session.github_id = Some(github_id);
        }
    }

    /// Clears token and GitHub id, regardless of whether they were set.
    pub fn clear_credentials(&self, id: &str) {
        if let Some(session) = self.sessions.write().get_mut(id) {
            session.token = None;
            session.github_id = None;
        }
    }

    /// Queues a flash notice on a session, replacing any pending one.
    pub fn push_flash(&self, id: &str, flash: Flash) {
        if let Some(session) = self.sessions.write().get_mut(id) {
            session.flash = Some(flash);
        }
    }

    /// Takes (and removes) the pending flash notice, if any.
    pub fn take_flash(&self, id: &str) -> Option<Flash> {
        self.sessions.write().get_mut(id)?.flash.take()
    }
}

/// Extracts the session id from a request's `Cookie` headers.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, id)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !id.is_empty() {
                    return Some(id.to_string());
                }
            }
        }
    }
    None
}

/// Builds the `Set-Cookie` value for a session id.
pub fn session_cookie(id: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly"))
        .expect("session ids are alphanumeric")
}
