//! End-to-end tests for the login-gated management routes.

use axum::{body::Body, http::header, http::Request};
use bookshelf_auth::mock::MockGithubClient;
use bookshelf_auth::SESSION_COOKIE;
use bookshelf_server::{create_app, seed_demo_catalog, AppState};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

fn create_test_app() -> (NormalizePath<axum::Router>, AppState) {
    let state = AppState::new(Arc::new(MockGithubClient::new()));
    seed_demo_catalog(&state.catalog);
    (create_app(state.clone()), state)
}

/// Mints a logged-in session directly in the store and returns its cookie id.
fn login(state: &AppState) -> String {
    let session_id = state.sessions.create();
    state.sessions.set_token(&session_id, "mock-token");
    state.sessions.set_github_id(&session_id, 1000);
    session_id
}

fn cookie(session_id: &str) -> String {
    format!("{SESSION_COOKIE}={session_id}")
}

async fn get(
    app: &NormalizePath<axum::Router>,
    uri: &str,
    session_id: Option<&str>,
) -> axum::response::Response {
    let mut request = Request::get(uri);
    if let Some(id) = session_id {
        request = request.header(header::COOKIE, cookie(id));
    }
    app.clone()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(
    app: &NormalizePath<axum::Router>,
    uri: &str,
    session_id: Option<&str>,
    form: &str,
) -> axum::response::Response {
    let mut request = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(id) = session_id {
        request = request.header(header::COOKIE, cookie(id));
    }
    app.clone()
        .oneshot(request.body(Body::from(form.to_string())).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ==================== Gate ====================

#[tokio::test]
async fn test_anonymous_add_form_gets_401_page() {
    let (app, _) = create_test_app();

    let response = get(&app, "/books/add", None).await;
    assert_eq!(response.status(), 401);
    let body = body_string(response).await;
    assert!(body.contains("log in with GitHub"));
}

#[tokio::test]
async fn test_anonymous_writes_are_rejected() {
    let (app, state) = create_test_app();
    let before = state.catalog.book_count();

    let add = post_form(
        &app,
        "/books/add",
        None,
        "title=Sneaky&pub_date=2020-01-01&topic=Python",
    )
    .await;
    assert_eq!(add.status(), 401);

    let delete = post_form(&app, "/python/fluent-python/delete", None, "").await;
    assert_eq!(delete.status(), 401);

    assert_eq!(state.catalog.book_count(), before);
}

// ==================== Add ====================

#[tokio::test]
async fn test_logged_in_add_creates_book() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    let response = post_form(
        &app,
        "/books/add",
        Some(&session_id),
        "title=Effective+Python&description=90+ways&pub_date=2015-03-01\
         &topic=Python&authors=Brett+Slatkin",
    )
    .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/python/effective-python"
    );

    let book = state.catalog.get_book_by_slug("effective-python").unwrap();
    assert_eq!(book.title, "Effective Python");
    assert_eq!(
        state.catalog.get_authors_by_book_id(book.id),
        vec!["Brett Slatkin"]
    );
}

#[tokio::test]
async fn test_add_with_new_topic_creates_the_topic() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    let response = post_form(
        &app,
        "/books/add",
        Some(&session_id),
        "title=Learn+You+a+Haskell&pub_date=2011-04-01&topic=Haskell",
    )
    .await;
    assert_eq!(response.status(), 303);

    let topic = state.catalog.get_topic_by_slug("haskell").unwrap();
    assert_eq!(topic.name, "Haskell");
    let overview = get(&app, "/haskell", None).await;
    assert_eq!(overview.status(), 200);
}

#[tokio::test]
async fn test_add_with_bad_date_bounces_back_to_form() {
    let (app, state) = create_test_app();
    let session_id = login(&state);
    let before = state.catalog.book_count();

    let response = post_form(
        &app,
        "/books/add",
        Some(&session_id),
        "title=Oops&pub_date=not-a-date&topic=Python",
    )
    .await;

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()[header::LOCATION], "/books/add");
    assert_eq!(state.catalog.book_count(), before);
}

#[tokio::test]
async fn test_duplicate_title_gets_suffixed_slug() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    let response = post_form(
        &app,
        "/books/add",
        Some(&session_id),
        "title=Fluent+Python&pub_date=2022-04-01&topic=Python",
    )
    .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/python/fluent-python-2"
    );
    assert!(state.catalog.get_book_by_slug("fluent-python-2").is_ok());
}

// ==================== Edit ====================

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    let response = get(&app, "/python/fluent-python/edit", Some(&session_id)).await;
    assert_eq!(response.status(), 200);
    let body = body_string(response).await;
    assert!(body.contains("Fluent Python"));
    assert!(body.contains("Luciano Ramalho"));
}

#[tokio::test]
async fn test_edit_moves_book_and_sweeps_old_topic() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    // Rust has a single seeded book; moving it leaves the topic bookless.
    let response = post_form(
        &app,
        "/rust/the-rust-programming-language/edit",
        Some(&session_id),
        "title=The+Rust+Programming+Language&pub_date=2019-08-12\
         &topic=Systems&authors=Steve+Klabnik,Carol+Nichols",
    )
    .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/systems/the-rust-programming-language"
    );

    assert!(state.catalog.get_topic_by_slug("rust").is_err());
    let detail = get(&app, "/systems/the-rust-programming-language", None).await;
    assert_eq!(detail.status(), 200);
}

#[tokio::test]
async fn test_edit_keeps_slug_when_title_changes() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    let response = post_form(
        &app,
        "/python/python-tricks/edit",
        Some(&session_id),
        "title=Python+Tricks,+Second+Edition&pub_date=2017-10-25\
         &topic=Python&authors=Dan+Bader",
    )
    .await;

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/python/python-tricks"
    );
    let book = state.catalog.get_book_by_slug("python-tricks").unwrap();
    assert_eq!(book.title, "Python Tricks, Second Edition");
}

#[tokio::test]
async fn test_edit_unknown_book_is_404() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    let response = post_form(
        &app,
        "/python/no-such-book/edit",
        Some(&session_id),
        "title=X&pub_date=2020-01-01&topic=Python",
    )
    .await;
    assert_eq!(response.status(), 404);
}

// ==================== Delete ====================

#[tokio::test]
async fn test_delete_removes_book_and_redirects_home() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    let response = post_form(&app, "/python/fluent-python/delete", Some(&session_id), "").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()[header::LOCATION], "/");

    assert!(state.catalog.get_book_by_slug("fluent-python").is_err());
    let detail = get(&app, "/python/fluent-python", None).await;
    assert_eq!(detail.status(), 404);
}

#[tokio::test]
async fn test_deleting_last_book_sweeps_the_topic() {
    let (app, state) = create_test_app();
    let session_id = login(&state);

    let response = post_form(
        &app,
        "/craft/the-pragmatic-programmer/delete",
        Some(&session_id),
        "",
    )
    .await;
    assert_eq!(response.status(), 303);

    assert!(state.catalog.get_topic_by_slug("craft").is_err());
    let overview = get(&app, "/craft", None).await;
    assert_eq!(overview.status(), 404);
}

#[tokio::test]
async fn test_delete_sweeps_authors_with_no_books_left() {
    let (app, state) = create_test_app();
    let session_id = login(&state);
    let authors_before = state.catalog.author_count();

    let response = post_form(&app, "/python/python-tricks/delete", Some(&session_id), "").await;
    assert_eq!(response.status(), 303);

    // Dan Bader only wrote the deleted book.
    assert!(state.catalog.author_count() < authors_before);
}
