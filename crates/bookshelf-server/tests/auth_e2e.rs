//! End-to-end tests for the GitHub login flow.

use axum::{body::Body, http::header, http::Request};
use bookshelf_auth::mock::MockGithubClient;
use bookshelf_auth::SESSION_COOKIE;
use bookshelf_server::{create_app, seed_demo_catalog, AppState};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::normalize_path::NormalizePath;

fn create_test_app(github: MockGithubClient) -> (NormalizePath<axum::Router>, AppState) {
    let state = AppState::new(Arc::new(github));
    seed_demo_catalog(&state.catalog);
    (create_app(state.clone()), state)
}

async fn get(app: &NormalizePath<axum::Router>, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_with_cookie(
    app: &NormalizePath<axum::Router>,
    uri: &str,
    session_id: &str,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::get(uri)
                .header(header::COOKIE, format!("{SESSION_COOKIE}={session_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

fn session_id_from(response: &axum::response::Response) -> String {
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    cookie
        .trim_start_matches(&format!("{SESSION_COOKIE}="))
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_login_redirects_to_provider() {
    let (app, _) = create_test_app(MockGithubClient::new());

    let response = get(&app, "/login").await;
    assert_eq!(response.status(), 303);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.contains("authorize"));
}

#[tokio::test]
async fn test_login_without_secrets_bounces_home() {
    let (app, _) = create_test_app(MockGithubClient::unconfigured());

    let response = get(&app, "/login").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_full_login_flow_creates_user_and_flashes_once() {
    let (app, state) = create_test_app(MockGithubClient::with_user_id(4242));

    // Provider calls back with a code; the exchanged token lands in a
    // fresh session whose cookie comes back on the redirect.
    let callback = get(&app, "/github-callback?code=abc").await;
    assert_eq!(callback.status(), 303);
    assert_eq!(callback.headers()[header::LOCATION], "/login-success");
    let session_id = session_id_from(&callback);

    // Identity resolution creates the local user row.
    let success = get_with_cookie(&app, "/login-success", &session_id).await;
    assert_eq!(success.status(), 303);
    assert_eq!(success.headers()[header::LOCATION], "/");
    assert!(state.catalog.get_user_by_github_id(4242).is_some());

    // The success notice shows on the next page, then is gone.
    let overview = get_with_cookie(&app, "/", &session_id).await;
    let body = body_string(overview).await;
    assert!(body.contains("Login successful."));

    let overview_again = get_with_cookie(&app, "/", &session_id).await;
    let body = body_string(overview_again).await;
    assert!(!body.contains("Login successful."));
}

#[tokio::test]
async fn test_repeat_login_does_not_duplicate_user() {
    let (app, state) = create_test_app(MockGithubClient::with_user_id(4242));

    for _ in 0..2 {
        let callback = get(&app, "/github-callback?code=abc").await;
        let session_id = session_id_from(&callback);
        get_with_cookie(&app, "/login-success", &session_id).await;
    }

    let user = state.catalog.get_user_by_github_id(4242).unwrap();
    assert_eq!(state.catalog.find_or_create_user(4242).id, user.id);
}

#[tokio::test]
async fn test_callback_with_failed_exchange_bounces_home() {
    let (app, _) = create_test_app(MockGithubClient::failing_exchange());

    let response = get(&app, "/github-callback?code=abc").await;
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (app, state) = create_test_app(MockGithubClient::new());

    let callback = get(&app, "/github-callback?code=abc").await;
    let session_id = session_id_from(&callback);
    get_with_cookie(&app, "/login-success", &session_id).await;

    let logout = get_with_cookie(&app, "/logout", &session_id).await;
    assert_eq!(logout.status(), 303);

    let session = state.sessions.get(&session_id).unwrap();
    assert!(session.token.is_none());
    assert!(session.github_id.is_none());
}
