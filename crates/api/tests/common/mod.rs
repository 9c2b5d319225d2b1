#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use intake_api::config::ServerConfig;
use intake_api::notifications::LogNotifier;
use intake_api::router::build_app_router;
use intake_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_cookie: "intake_session".to_string(),
        session_max_idle_days: 30,
        smtp_url: None,
        notify_from: None,
        notify_to: None,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery, session cookie) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier: Arc::new(LogNotifier),
    };
    build_app_router(state, &config)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    form_body: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match form_body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// GET without a session cookie.
pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

/// GET carrying an existing session cookie.
pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response {
    send(app, Method::GET, uri, Some(cookie), None).await
}

/// POST a urlencoded form body, optionally with a session cookie.
pub async fn post_form(
    app: &Router,
    uri: &str,
    body: &str,
    cookie: Option<&str>,
) -> Response {
    send(app, Method::POST, uri, cookie, Some(body)).await
}

/// POST with an empty body, optionally with a session cookie.
pub async fn post_empty(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    send(app, Method::POST, uri, cookie, None).await
}

/// Collect and parse the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!(
            "response body is not JSON ({err}): {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

/// Extract the `name=value` pair of the session cookie set by a response.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).to_string())
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response has no Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// POST one journey answer, capturing the session cookie on first use.
pub async fn answer(
    app: &Router,
    cookie: &mut Option<String>,
    uri: &str,
    body: &str,
) -> Response {
    let response = post_form(app, uri, body, cookie.as_deref()).await;
    if cookie.is_none() {
        *cookie = session_cookie(&response);
    }
    response
}

/// Walk the feedback journey to completion (contact declined),
/// returning the session cookie holding the answers.
pub async fn complete_feedback_journey(app: &Router) -> String {
    let mut cookie: Option<String> = None;

    let response = answer(
        app,
        &mut cookie,
        "/api/v1/feedback/experience/rating",
        "rating=4",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = answer(
        app,
        &mut cookie,
        "/api/v1/feedback/experience/comments",
        "comments=Quick+and+clear",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = answer(
        app,
        &mut cookie,
        "/api/v1/feedback/contact/can-we-contact-you",
        "wants_contact=no",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    cookie.expect("journey POSTs should have set a session cookie")
}
