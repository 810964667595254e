//! In-memory relational store for the Bookshelf catalog.
//!
//! This crate provides:
//! - **CatalogStore**: thread-safe tables for users, topics, books, authors
//!   and the two many-to-many association tables
//! - **Query helpers**: slug and name lookups, joined reads
//! - **Orphan sweeps**: batch deletion of authors/topics/books left without
//!   association rows
//! - **Write paths**: add/update/delete book operations with
//!   find-or-create topic and author resolution
//!
//! # Example
//!
//! ```
//! use bookshelf_catalog::{CatalogStore, NewBook};
//! use chrono::NaiveDate;
//!
//! let store = CatalogStore::new();
//!
//! let (book, topic) = store.add_book(NewBook {
//!     title: "Fluent Python".into(),
//!     description: "A deep dive into idiomatic Python.".into(),
//!     pub_date: NaiveDate::from_ymd_opt(2015, 8, 20).unwrap(),
//!     topic: "Python".into(),
//!     authors: vec!["Luciano Ramalho".into()],
//! }).unwrap();
//!
//! assert_eq!(book.slug, "fluent-python");
//! assert_eq!(topic.slug, "python");
//! assert_eq!(store.get_authors_by_book_id(book.id), vec!["Luciano Ramalho"]);
//! ```

mod draft;
mod error;
mod store;

pub use draft::{BookChanges, NewBook};
pub use error::{CatalogError, Result};
pub use store::CatalogStore;
