//! Error types for the web routes.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use bookshelf_auth::Identity;

use crate::templates::{
    ForbiddenTemplate, InternalErrorTemplate, NotFoundTemplate, UnauthorizedTemplate,
};

/// Web route errors. Each variant renders its own status page.
#[derive(Debug, Error)]
pub enum WebError {
    /// A slug resolved to no row.
    #[error("not found: {message}")]
    NotFound { message: String, logged_in: bool },

    /// The request needs a logged-in visitor.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String, logged_in: bool },

    /// The visitor is logged in but not allowed to do this.
    #[error("forbidden: {message}")]
    Forbidden { message: String, logged_in: bool },

    /// Template rendering error.
    #[error("template error: {0}")]
    Template(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl WebError {
    /// Not-found error carrying the triggering condition for display.
    pub fn not_found(err: impl std::fmt::Display, identity: &Identity) -> Self {
        WebError::NotFound {
            message: err.to_string(),
            logged_in: identity.is_logged_in(),
        }
    }

    /// Unauthorized error for login-gated routes.
    pub fn unauthorized(message: impl Into<String>, identity: &Identity) -> Self {
        WebError::Unauthorized {
            message: message.into(),
            logged_in: identity.is_logged_in(),
        }
    }

    /// Forbidden error.
    pub fn forbidden(message: impl Into<String>, identity: &Identity) -> Self {
        WebError::Forbidden {
            message: message.into(),
            logged_in: identity.is_logged_in(),
        }
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        WebError::Template(err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, rendered) = match self {
            WebError::NotFound { message, logged_in } => (
                StatusCode::NOT_FOUND,
                NotFoundTemplate { message, logged_in }.render(),
            ),
            WebError::Unauthorized { message, logged_in } => (
                StatusCode::UNAUTHORIZED,
                UnauthorizedTemplate { message, logged_in }.render(),
            ),
            WebError::Forbidden { message, logged_in } => (
                StatusCode::FORBIDDEN,
                ForbiddenTemplate { message, logged_in }.render(),
            ),
            WebError::Template(message) | WebError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                InternalErrorTemplate {
                    message,
                    logged_in: false,
                }
                .render(),
            ),
        };

        match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "error page failed to render");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_variant_maps_to_its_own_status() {
        let identity = Identity::default();

        let cases = [
            (WebError::not_found("x", &identity), StatusCode::NOT_FOUND),
            (
                WebError::unauthorized("x", &identity),
                StatusCode::UNAUTHORIZED,
            ),
            (WebError::forbidden("x", &identity), StatusCode::FORBIDDEN),
            (
                WebError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
