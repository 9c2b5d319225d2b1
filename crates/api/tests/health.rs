//! Integration tests for the health check endpoint and general HTTP
//! behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_check_returns_ok_with_json(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn response_contains_x_request_id_header(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response.headers().get("x-request-id");
    assert!(
        request_id.is_some(),
        "Response must contain an x-request-id header"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn health_endpoint_sets_no_session_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/health").await;
    assert!(common::session_cookie(&response).is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn api_routes_mint_a_session_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/feedback").await;

    let cookie = common::session_cookie(&response).expect("session cookie should be set");
    assert!(cookie.starts_with("intake_session="));

    // A request that presents the cookie does not get a new one.
    let response = common::get_with_cookie(&app, "/api/v1/feedback", &cookie).await;
    assert!(common::session_cookie(&response).is_none());
}
