//! Askama template definitions.

use askama::Template;
use serde::Serialize;

use bookshelf_auth::Flash;

/// Topic entry for the navigation list.
#[derive(Debug, Clone, Serialize)]
pub struct TopicSummary {
    pub name: String,
    pub slug: String,
}

/// Book entry for overview lists.
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    pub title: String,
    pub slug: String,
    pub topic_slug: String,
}

/// Book fields for the detail page.
#[derive(Debug, Clone, Serialize)]
pub struct BookView {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub pub_date: String,
}

/// Flash notice with a CSS-friendly level name.
#[derive(Debug, Clone, Serialize)]
pub struct FlashView {
    pub level: String,
    pub message: String,
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        Self {
            level: flash.level.as_str().to_string(),
            message: flash.message,
        }
    }
}

/// Catalog overview page.
#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub topics: Vec<TopicSummary>,
    pub topic: String,
    pub t_slug: String,
    pub books: Vec<BookSummary>,
    pub logged_in: bool,
    pub flash: Option<FlashView>,
}

/// Book detail page.
#[derive(Template)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub book: BookView,
    pub authors: Vec<String>,
    pub t_slug: String,
    pub b_slug: String,
    pub logged_in: bool,
    pub flash: Option<FlashView>,
}

/// Add/edit book form page.
#[derive(Template)]
#[template(path = "book_form.html")]
pub struct BookFormTemplate {
    pub heading: String,
    pub action: String,
    pub title: String,
    pub description: String,
    pub pub_date: String,
    pub topic: String,
    pub authors: String,
    pub logged_in: bool,
}

/// 401 page.
#[derive(Template)]
#[template(path = "401.html")]
pub struct UnauthorizedTemplate {
    pub message: String,
    pub logged_in: bool,
}

/// 403 page.
#[derive(Template)]
#[template(path = "403.html")]
pub struct ForbiddenTemplate {
    pub message: String,
    pub logged_in: bool,
}

/// 404 page.
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub message: String,
    pub logged_in: bool,
}

/// 500 page.
#[derive(Template)]
#[template(path = "500.html")]
pub struct InternalErrorTemplate {
    pub message: String,
    pub logged_in: bool,
}
