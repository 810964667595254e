//! Catalog entity types.
//!
//! Foreign keys are plain numeric ids rather than object references, so the
//! many-to-many book/author/topic graph carries no ownership cycles. The
//! association rows have no payload of their own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A catalog user, created on first successful GitHub login.
///
/// Never mutated after creation; represents catalog ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: u64,
    /// Numeric GitHub user id.
    pub github_id: u64,
}

impl User {
    /// Creates a new user record.
    pub fn new(id: u64, github_id: u64) -> Self {
        Self { id, github_id }
    }
}

/// A topic grouping books, addressed by a unique slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Unique URL-safe identifier derived from the name.
    pub slug: String,
}

impl Topic {
    /// Creates a new topic.
    pub fn new(id: u64, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// A book in the catalog, addressed by a unique slug.
///
/// Serializes to a flat JSON record; `pub_date` renders as an ISO-8601
/// date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier.
    pub id: u64,
    /// Title of the book.
    pub title: String,
    /// Unique URL-safe identifier derived from the title.
    pub slug: String,
    /// Short description.
    pub description: String,
    /// Publication date.
    pub pub_date: NaiveDate,
}

impl Book {
    /// Creates a new book.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        slug: impl Into<String>,
        description: impl Into<String>,
        pub_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            slug: slug.into(),
            description: description.into(),
            pub_date,
        }
    }
}

/// An author, joined to books via [`BookAuthor`] rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Unique identifier.
    pub id: u64,
    /// Full name.
    pub name: String,
}

impl Author {
    /// Creates a new author.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Association row joining a book to a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookTopic {
    /// Book side of the association.
    pub book_id: u64,
    /// Topic side of the association.
    pub topic_id: u64,
}

/// Association row joining a book to an author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookAuthor {
    /// Book side of the association.
    pub book_id: u64,
    /// Author side of the association.
    pub author_id: u64,
}
