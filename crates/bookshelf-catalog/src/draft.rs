//! Write-path input types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Input for creating a book.
///
/// The topic and authors are given by name; the store resolves each name to
/// an existing row or creates one (find-or-create).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    /// Title of the book; the slug is derived from it.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Publication date.
    pub pub_date: NaiveDate,
    /// Topic name the book is filed under.
    pub topic: String,
    /// Author names.
    pub authors: Vec<String>,
}

/// Input for updating a book's scalar fields and associations.
///
/// The book keeps its slug even when the title changes, so existing URLs
/// stay valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookChanges {
    /// New title.
    pub title: String,
    /// New description.
    pub description: String,
    /// New publication date.
    pub pub_date: NaiveDate,
    /// Topic name to re-file the book under.
    pub topic: String,
    /// Replacement author names.
    pub authors: Vec<String>,
}
