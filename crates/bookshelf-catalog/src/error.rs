//! Error types for catalog operations.

use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No topic row matches the given slug.
    #[error("topic not found: {0}")]
    TopicNotFound(String),

    /// No book row matches the given slug.
    #[error("book not found: {0}")]
    BookNotFound(String),
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
