//! Core types for Bookshelf.
//!
//! This crate defines the catalog entities (users, topics, books, authors
//! and their association rows) plus the pure slug derivation used to give
//! topics and books unique URL-safe identifiers. It performs no I/O.

pub mod entities;
pub mod slug;

pub use entities::{Author, Book, BookAuthor, BookTopic, Topic, User};
pub use slug::make_slug;
