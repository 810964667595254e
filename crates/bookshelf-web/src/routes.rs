//! Catalog route handlers.

use askama::Template;
use axum::{
    extract::{FromRef, Path, State},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use bookshelf_auth::{flash_redirect, AuthState, Flash, Identity, SessionStore};
use bookshelf_catalog::{BookChanges, CatalogStore, NewBook};
use bookshelf_types::Book;

use crate::error::WebError;
use crate::templates::*;

/// Topic shown on `/` when no slug is given.
const DEFAULT_TOPIC_SLUG: &str = "python";

/// Shared state for the catalog routes.
#[derive(Clone)]
pub struct WebState {
    /// Catalog store.
    pub catalog: Arc<CatalogStore>,
    /// Session store, for flash notices.
    pub sessions: Arc<SessionStore>,
}

/// Creates the catalog router.
///
/// Static segments (`/JSON`, `/books/add`, `/login`, ...) take priority
/// over the `{topic_slug}` captures, so a topic slugged like one of them
/// is unreachable by URL, as in any slug-routed catalog.
pub fn web_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    WebState: FromRef<S>,
    AuthState: FromRef<S>,
{
    Router::new()
        .route("/", get(overview_default))
        .route("/JSON", get(json_all))
        .route("/books/add", get(add_book_form).post(add_book))
        .route("/{topic_slug}", get(overview))
        .route("/{topic_slug}/JSON", get(json_topic))
        .route("/{topic_slug}/{book_slug}", get(detail))
        .route(
            "/{topic_slug}/{book_slug}/edit",
            get(edit_book_form).post(edit_book),
        )
        .route("/{topic_slug}/{book_slug}/delete", post(delete_book))
}

// ==================== Overview & Detail ====================

/// Overview for `/`, defaulting to the `python` topic.
async fn overview_default(
    State(web): State<WebState>,
    identity: Identity,
) -> Result<impl IntoResponse, WebError> {
    render_overview(&web, &identity, DEFAULT_TOPIC_SLUG)
}

/// Overview for `/{topic_slug}`: the topic list for navigation plus the
/// books joined to the requested topic.
async fn overview(
    State(web): State<WebState>,
    identity: Identity,
    Path(topic_slug): Path<String>,
) -> Result<impl IntoResponse, WebError> {
    render_overview(&web, &identity, &topic_slug)
}

fn render_overview(
    web: &WebState,
    identity: &Identity,
    t_slug: &str,
) -> Result<Html<String>, WebError> {
    let topics: Vec<TopicSummary> = web
        .catalog
        .list_topics()
        .into_iter()
        .map(|t| TopicSummary {
            name: t.name,
            slug: t.slug,
        })
        .collect();

    let topic = web
        .catalog
        .get_topic_by_slug(t_slug)
        .map_err(|e| WebError::not_found(e, identity))?;
    let books: Vec<BookSummary> = web
        .catalog
        .list_books_by_topic_slug(t_slug)
        .map_err(|e| WebError::not_found(e, identity))?
        .into_iter()
        .map(|b| BookSummary {
            title: b.title,
            slug: b.slug,
            topic_slug: t_slug.to_string(),
        })
        .collect();

    let template = OverviewTemplate {
        topics,
        topic: topic.name,
        t_slug: t_slug.to_string(),
        books,
        logged_in: identity.is_logged_in(),
        flash: take_flash(web, identity),
    };
    Ok(Html(template.render()?))
}

/// Detail page for `/{topic_slug}/{book_slug}`.
///
/// The topic slug is only checked for independent existence; whether the
/// book is actually filed under that topic is not verified, so a book is
/// reachable under any existing topic's URL.
async fn detail(
    State(web): State<WebState>,
    identity: Identity,
    Path((topic_slug, book_slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, WebError> {
    web.catalog
        .get_topic_by_slug(&topic_slug)
        .map_err(|e| WebError::not_found(e, &identity))?;
    let book = web
        .catalog
        .get_book_by_slug(&book_slug)
        .map_err(|e| WebError::not_found(e, &identity))?;
    let authors = web.catalog.get_authors_by_book_id(book.id);

    let template = DetailTemplate {
        book: BookView {
            title: book.title,
            slug: book.slug,
            description: book.description,
            pub_date: book.pub_date.to_string(),
        },
        authors,
        t_slug: topic_slug,
        b_slug: book_slug,
        logged_in: identity.is_logged_in(),
        flash: take_flash(&web, &identity),
    };
    Ok(Html(template.render()?))
}

fn take_flash(web: &WebState, identity: &Identity) -> Option<FlashView> {
    identity
        .session_id
        .as_deref()
        .and_then(|id| web.sessions.take_flash(id))
        .map(FlashView::from)
}

// ==================== JSON Export ====================

#[derive(Debug, Serialize)]
struct BooksExport {
    books: Vec<Book>,
}

/// `/JSON`: every book as a flat JSON record.
async fn json_all(State(web): State<WebState>) -> Json<BooksExport> {
    Json(BooksExport {
        books: web.catalog.list_books(),
    })
}

/// `/{topic_slug}/JSON`: the topic's books only; 404 on an unknown topic.
async fn json_topic(
    State(web): State<WebState>,
    identity: Identity,
    Path(topic_slug): Path<String>,
) -> Result<Json<BooksExport>, WebError> {
    let books = web
        .catalog
        .list_books_by_topic_slug(&topic_slug)
        .map_err(|e| WebError::not_found(e, &identity))?;
    Ok(Json(BooksExport { books }))
}

// ==================== Management ====================

/// Form payload for adding or editing a book.
#[derive(Debug, Deserialize)]
struct BookFormData {
    title: String,
    #[serde(default)]
    description: String,
    pub_date: String,
    topic: String,
    #[serde(default)]
    authors: String,
}

impl BookFormData {
    fn author_names(&self) -> Vec<String> {
        self.authors
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn require_login(identity: &Identity) -> Result<(), WebError> {
    if identity.is_logged_in() {
        Ok(())
    } else {
        Err(WebError::unauthorized(
            "log in with GitHub to manage the catalog",
            identity,
        ))
    }
}

/// Empty add-book form.
async fn add_book_form(
    State(_web): State<WebState>,
    identity: Identity,
) -> Result<impl IntoResponse, WebError> {
    require_login(&identity)?;

    let template = BookFormTemplate {
        heading: "Add book".to_string(),
        action: "/books/add".to_string(),
        title: String::new(),
        description: String::new(),
        pub_date: String::new(),
        topic: String::new(),
        authors: String::new(),
        logged_in: true,
    };
    Ok(Html(template.render()?))
}

/// Creates a book from the submitted form and redirects to its detail page.
async fn add_book(
    State(web): State<WebState>,
    identity: Identity,
    Form(form): Form<BookFormData>,
) -> Result<Response, WebError> {
    require_login(&identity)?;

    let Ok(pub_date) = NaiveDate::parse_from_str(&form.pub_date, "%Y-%m-%d") else {
        return Ok(flash_redirect(
            &web.sessions,
            &identity,
            Flash::danger("Invalid publication date."),
            "/books/add",
        ));
    };

    let (book, topic) = web
        .catalog
        .add_book(NewBook {
            title: form.title.clone(),
            description: form.description.clone(),
            pub_date,
            topic: form.topic.clone(),
            authors: form.author_names(),
        })
        .map_err(|e| WebError::Internal(e.to_string()))?;

    tracing::info!(book = %book.slug, topic = %topic.slug, "book added");
    Ok(flash_redirect(
        &web.sessions,
        &identity,
        Flash::success("Book added."),
        &format!("/{}/{}", topic.slug, book.slug),
    ))
}

/// Edit form pre-filled with the book's current fields.
async fn edit_book_form(
    State(web): State<WebState>,
    identity: Identity,
    Path((topic_slug, book_slug)): Path<(String, String)>,
) -> Result<impl IntoResponse, WebError> {
    require_login(&identity)?;

    let topic = web
        .catalog
        .get_topic_by_slug(&topic_slug)
        .map_err(|e| WebError::not_found(e, &identity))?;
    let book = web
        .catalog
        .get_book_by_slug(&book_slug)
        .map_err(|e| WebError::not_found(e, &identity))?;
    let authors = web.catalog.get_authors_by_book_id(book.id).join(", ");

    let template = BookFormTemplate {
        heading: format!("Edit {}", book.title),
        action: format!("/{topic_slug}/{book_slug}/edit"),
        title: book.title,
        description: book.description,
        pub_date: book.pub_date.to_string(),
        topic: topic.name,
        authors,
        logged_in: true,
    };
    Ok(Html(template.render()?))
}

/// Applies the submitted changes and redirects to the book's detail page
/// under its (possibly new) topic.
async fn edit_book(
    State(web): State<WebState>,
    identity: Identity,
    Path((topic_slug, book_slug)): Path<(String, String)>,
    Form(form): Form<BookFormData>,
) -> Result<Response, WebError> {
    require_login(&identity)?;

    let Ok(pub_date) = NaiveDate::parse_from_str(&form.pub_date, "%Y-%m-%d") else {
        return Ok(flash_redirect(
            &web.sessions,
            &identity,
            Flash::danger("Invalid publication date."),
            &format!("/{topic_slug}/{book_slug}/edit"),
        ));
    };

    let book = web
        .catalog
        .update_book(
            &book_slug,
            BookChanges {
                title: form.title.clone(),
                description: form.description.clone(),
                pub_date,
                topic: form.topic.clone(),
                authors: form.author_names(),
            },
        )
        .map_err(|e| WebError::not_found(e, &identity))?;

    let target = web
        .catalog
        .get_topics_by_name(form.topic.trim())
        .into_iter()
        .next()
        .map(|t| format!("/{}/{}", t.slug, book.slug))
        .unwrap_or_else(|| "/".to_string());

    tracing::info!(book = %book.slug, "book updated");
    Ok(flash_redirect(
        &web.sessions,
        &identity,
        Flash::success("Book updated."),
        &target,
    ))
}

/// Deletes the book, sweeps any rows the deletion orphaned, and goes home.
async fn delete_book(
    State(web): State<WebState>,
    identity: Identity,
    Path((_topic_slug, book_slug)): Path<(String, String)>,
) -> Result<Response, WebError> {
    require_login(&identity)?;

    web.catalog
        .delete_book(&book_slug)
        .map_err(|e| WebError::not_found(e, &identity))?;

    tracing::info!(book = %book_slug, "book deleted");
    Ok(flash_redirect(
        &web.sessions,
        &identity,
        Flash::success("Book deleted."),
        "/",
    ))
}
