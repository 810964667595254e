//! Demo catalog seed data.

use bookshelf_catalog::{CatalogStore, NewBook};
use chrono::NaiveDate;

/// Seeds a small demo shelf so a fresh server has something to show.
pub fn seed_demo_catalog(catalog: &CatalogStore) {
    let books = [
        (
            "Fluent Python",
            "A deep dive into idiomatic Python.",
            (2015, 8, 20),
            "Python",
            vec!["Luciano Ramalho"],
        ),
        (
            "Python Tricks",
            "A buffet of awesome Python features.",
            (2017, 10, 25),
            "Python",
            vec!["Dan Bader"],
        ),
        (
            "The Rust Programming Language",
            "The official book on Rust.",
            (2019, 8, 12),
            "Rust",
            vec!["Steve Klabnik", "Carol Nichols"],
        ),
        (
            "The Pragmatic Programmer",
            "Your journey to mastery.",
            (2019, 9, 13),
            "Craft",
            vec!["David Thomas", "Andrew Hunt"],
        ),
    ];

    for (title, description, (y, m, d), topic, authors) in books {
        let new = NewBook {
            title: title.to_string(),
            description: description.to_string(),
            pub_date: NaiveDate::from_ymd_opt(y, m, d).expect("seed dates are valid"),
            topic: topic.to_string(),
            authors: authors.into_iter().map(str::to_string).collect(),
        };
        if let Err(err) = catalog.add_book(new) {
            tracing::warn!(title, error = %err, "failed to seed book");
        }
    }

    tracing::info!(
        books = catalog.book_count(),
        topics = catalog.topic_count(),
        authors = catalog.author_count(),
        "demo catalog seeded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_consistent() {
        let catalog = CatalogStore::new();
        seed_demo_catalog(&catalog);

        assert_eq!(catalog.book_count(), 4);
        assert_eq!(catalog.topic_count(), 3);
        assert!(catalog.get_topic_by_slug("python").is_ok());
        assert!(catalog.get_book_by_slug("fluent-python").is_ok());
    }
}
