//! In-memory storage for catalog data.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use bookshelf_types::{make_slug, Author, Book, BookAuthor, BookTopic, Topic, User};

use crate::{
    draft::{BookChanges, NewBook},
    error::{CatalogError, Result},
};

/// Thread-safe in-memory store for the catalog.
///
/// Tables are plain maps keyed by id; the two association tables are row
/// vectors holding id pairs. Each operation leaves a consistent state on
/// its own; there are no cross-operation transactions.
#[derive(Debug, Default)]
pub struct CatalogStore {
    /// Next available ID for new entities.
    next_id: AtomicU64,

    /// Users by ID.
    users: RwLock<HashMap<u64, User>>,

    /// Topics by ID.
    topics: RwLock<HashMap<u64, Topic>>,

    /// Topic slug to ID mapping.
    topic_slug_index: RwLock<HashMap<String, u64>>,

    /// Books by ID.
    books: RwLock<HashMap<u64, Book>>,

    /// Book slug to ID mapping.
    book_slug_index: RwLock<HashMap<String, u64>>,

    /// Authors by ID.
    authors: RwLock<HashMap<u64, Author>>,

    /// Book-topic association rows.
    book_topics: RwLock<Vec<BookTopic>>,

    /// Book-author association rows.
    book_authors: RwLock<Vec<BookAuthor>>,
}

impl CatalogStore {
    /// Creates a new empty catalog store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a new unique ID.
    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    // ==================== Users ====================

    /// Gets a user by GitHub id.
    pub fn get_user_by_github_id(&self, github_id: u64) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|u| u.github_id == github_id)
            .cloned()
    }

    /// Returns the user for `github_id`, creating the row on first login.
    pub fn find_or_create_user(&self, github_id: u64) -> User {
        if let Some(user) = self.get_user_by_github_id(github_id) {
            return user;
        }

        let user = User::new(self.next_id(), github_id);
        self.users.write().insert(user.id, user.clone());
        user
    }

    // ==================== Topic & Book Lookups ====================

    /// Gets a topic by its slug.
    pub fn get_topic_by_slug(&self, slug: &str) -> Result<Topic> {
        let id = self
            .topic_slug_index
            .read()
            .get(slug)
            .copied()
            .ok_or_else(|| CatalogError::TopicNotFound(slug.to_string()))?;
        self.topics
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::TopicNotFound(slug.to_string()))
    }

    /// Gets a book by its slug.
    pub fn get_book_by_slug(&self, slug: &str) -> Result<Book> {
        let id = self
            .book_slug_index
            .read()
            .get(slug)
            .copied()
            .ok_or_else(|| CatalogError::BookNotFound(slug.to_string()))?;
        self.books
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::BookNotFound(slug.to_string()))
    }

    /// Returns the names of all authors joined to `book_id`, sorted by name.
    ///
    /// Empty when the book has no author associations.
    pub fn get_authors_by_book_id(&self, book_id: u64) -> Vec<String> {
        let author_ids: Vec<u64> = self
            .book_authors
            .read()
            .iter()
            .filter(|row| row.book_id == book_id)
            .map(|row| row.author_id)
            .collect();

        let authors = self.authors.read();
        let mut names: Vec<String> = author_ids
            .into_iter()
            .filter_map(|id| authors.get(&id).map(|a| a.name.clone()))
            .collect();
        names.sort();
        names
    }

    /// Returns every topic matching `name`.
    pub fn get_topics_by_name(&self, name: &str) -> Vec<Topic> {
        self.topics
            .read()
            .values()
            .filter(|t| t.name == name)
            .cloned()
            .collect()
    }

    /// Returns every author matching `name`.
    pub fn get_authors_by_name(&self, name: &str) -> Vec<Author> {
        self.authors
            .read()
            .values()
            .filter(|a| a.name == name)
            .cloned()
            .collect()
    }

    /// Lists all topics, sorted by name.
    pub fn list_topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.topics.read().values().cloned().collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        topics
    }

    /// Lists all books, ordered by publication date then title.
    pub fn list_books(&self) -> Vec<Book> {
        let mut books: Vec<Book> = self.books.read().values().cloned().collect();
        books.sort_by(|a, b| (a.pub_date, &a.title).cmp(&(b.pub_date, &b.title)));
        books
    }

    /// Lists the books joined to the topic named by `slug`, ordered by
    /// publication date then title.
    pub fn list_books_by_topic_slug(&self, slug: &str) -> Result<Vec<Book>> {
        let topic = self.get_topic_by_slug(slug)?;

        let book_ids: HashSet<u64> = self
            .book_topics
            .read()
            .iter()
            .filter(|row| row.topic_id == topic.id)
            .map(|row| row.book_id)
            .collect();

        let mut books: Vec<Book> = {
            let books = self.books.read();
            book_ids
                .into_iter()
                .filter_map(|id| books.get(&id).cloned())
                .collect()
        };
        books.sort_by(|a, b| (a.pub_date, &a.title).cmp(&(b.pub_date, &b.title)));
        Ok(books)
    }

    // ==================== Slug Derivation ====================

    /// Derives a unique slug for a new book titled `title`.
    ///
    /// Seeds the slug generator with every current book slug; O(n) in
    /// catalog size, which is fine at the expected scale.
    pub fn create_book_slug(&self, title: &str) -> String {
        let existing: HashSet<String> = self.book_slug_index.read().keys().cloned().collect();
        make_slug(&existing, title)
    }

    /// Derives a unique slug for a new topic named `name`.
    pub fn create_topic_slug(&self, name: &str) -> String {
        let existing: HashSet<String> = self.topic_slug_index.read().keys().cloned().collect();
        make_slug(&existing, name)
    }

    // ==================== Write Paths ====================

    /// Returns the topic named `name`, creating it (with a fresh slug) when
    /// no topic by that name exists.
    pub fn find_or_create_topic(&self, name: &str) -> Topic {
        if let Some(topic) = self.get_topics_by_name(name).into_iter().next() {
            return topic;
        }

        let slug = self.create_topic_slug(name);
        let topic = Topic::new(self.next_id(), name, slug);
        self.topics.write().insert(topic.id, topic.clone());
        self.topic_slug_index
            .write()
            .insert(topic.slug.clone(), topic.id);
        topic
    }

    /// Returns the author named `name`, creating the row when absent.
    pub fn find_or_create_author(&self, name: &str) -> Author {
        if let Some(author) = self.get_authors_by_name(name).into_iter().next() {
            return author;
        }

        let author = Author::new(self.next_id(), name);
        self.authors.write().insert(author.id, author.clone());
        author
    }

    /// Adds a book: resolves the topic and authors by name (find-or-create),
    /// derives a fresh unique slug from the title, and inserts the book with
    /// its association rows.
    ///
    /// Returns the created book together with its resolved topic.
    pub fn add_book(&self, new: NewBook) -> Result<(Book, Topic)> {
        let topic = self.find_or_create_topic(new.topic.trim());

        let slug = self.create_book_slug(&new.title);
        let book = Book::new(self.next_id(), new.title, slug, new.description, new.pub_date);
        self.books.write().insert(book.id, book.clone());
        self.book_slug_index
            .write()
            .insert(book.slug.clone(), book.id);

        self.book_topics.write().push(BookTopic {
            book_id: book.id,
            topic_id: topic.id,
        });

        for name in normalized_names(&new.authors) {
            let author = self.find_or_create_author(&name);
            self.book_authors.write().push(BookAuthor {
                book_id: book.id,
                author_id: author.id,
            });
        }

        Ok((book, topic))
    }

    /// Updates a book's scalar fields and re-points its topic and author
    /// associations, then sweeps any authors or topics the change orphaned.
    ///
    /// The slug stays fixed so existing URLs keep resolving.
    pub fn update_book(&self, book_slug: &str, changes: BookChanges) -> Result<Book> {
        let book = self.get_book_by_slug(book_slug)?;
        let topic = self.find_or_create_topic(changes.topic.trim());

        let updated = {
            let mut books = self.books.write();
            let entry = books
                .get_mut(&book.id)
                .ok_or_else(|| CatalogError::BookNotFound(book_slug.to_string()))?;
            entry.title = changes.title;
            entry.description = changes.description;
            entry.pub_date = changes.pub_date;
            entry.clone()
        };

        {
            let mut rows = self.book_topics.write();
            rows.retain(|row| row.book_id != book.id);
            rows.push(BookTopic {
                book_id: book.id,
                topic_id: topic.id,
            });
        }

        self.delete_bookauthor_by_book_id(book.id);
        for name in normalized_names(&changes.authors) {
            let author = self.find_or_create_author(&name);
            self.book_authors.write().push(BookAuthor {
                book_id: book.id,
                author_id: author.id,
            });
        }

        self.delete_bookless_authors();
        self.delete_bookless_topics();

        Ok(updated)
    }

    /// Deletes a book: its author associations first, then its topic
    /// associations and the row itself, then sweeps orphaned authors and
    /// topics.
    pub fn delete_book(&self, book_slug: &str) -> Result<()> {
        let book = self.get_book_by_slug(book_slug)?;

        self.delete_bookauthor_by_book_id(book.id);
        self.book_topics.write().retain(|row| row.book_id != book.id);

        self.books.write().remove(&book.id);
        self.book_slug_index.write().remove(&book.slug);

        self.delete_bookless_authors();
        self.delete_bookless_topics();

        Ok(())
    }

    // ==================== Orphan Sweeps ====================

    /// Deletes every `BookAuthor` row referencing `book_id`.
    ///
    /// Run before deleting a book to avoid dangling associations.
    pub fn delete_bookauthor_by_book_id(&self, book_id: u64) {
        self.book_authors.write().retain(|row| row.book_id != book_id);
    }

    /// Deletes every author without a `BookAuthor` row. Idempotent.
    ///
    /// Returns the number of rows removed.
    pub fn delete_bookless_authors(&self) -> usize {
        let referenced: HashSet<u64> = self
            .book_authors
            .read()
            .iter()
            .map(|row| row.author_id)
            .collect();

        let mut authors = self.authors.write();
        let before = authors.len();
        authors.retain(|id, _| referenced.contains(id));
        before - authors.len()
    }

    /// Deletes every topic without a `BookTopic` row. Idempotent.
    ///
    /// Returns the number of rows removed.
    pub fn delete_bookless_topics(&self) -> usize {
        let referenced: HashSet<u64> = self
            .book_topics
            .read()
            .iter()
            .map(|row| row.topic_id)
            .collect();

        let mut topics = self.topics.write();
        let mut index = self.topic_slug_index.write();
        let before = topics.len();
        topics.retain(|id, topic| {
            let keep = referenced.contains(id);
            if !keep {
                index.remove(&topic.slug);
            }
            keep
        });
        before - topics.len()
    }

    /// Deletes every book without a `BookTopic` row. Idempotent.
    ///
    /// `BookAuthor` rows referencing the removed books are the caller's
    /// responsibility ([`Self::delete_bookauthor_by_book_id`]).
    ///
    /// Returns the number of rows removed.
    pub fn delete_topicless_books(&self) -> usize {
        let referenced: HashSet<u64> = self
            .book_topics
            .read()
            .iter()
            .map(|row| row.book_id)
            .collect();

        let mut books = self.books.write();
        let mut index = self.book_slug_index.write();
        let before = books.len();
        books.retain(|id, book| {
            let keep = referenced.contains(id);
            if !keep {
                index.remove(&book.slug);
            }
            keep
        });
        before - books.len()
    }

    // ==================== Counts (for tests and diagnostics) ====================

    /// Number of book rows.
    pub fn book_count(&self) -> usize {
        self.books.read().len()
    }

    /// Number of topic rows.
    pub fn topic_count(&self) -> usize {
        self.topics.read().len()
    }

    /// Number of author rows.
    pub fn author_count(&self) -> usize {
        self.authors.read().len()
    }
}

/// Trims, drops empties, and deduplicates author names while preserving
/// first-seen order.
fn normalized_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_string()))
        .map(str::to_string)
        .collect()
}
