//! HTTP-level integration tests for the feedback journey's create flow:
//! question rendering, validation, navigation, and conditional skips.

mod common;

use axum::http::StatusCode;
use common::{
    answer, body_json, get, get_with_cookie, location, post_form, session_cookie,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn journey_start_redirects_to_first_question(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/feedback").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/feedback/experience/rating");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn question_page_renders_definition_and_links(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/feedback/experience/rating").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let view = &json["data"];
    assert_eq!(view["field_name"], "rating");
    assert_eq!(view["display_type"], "radio");
    assert_eq!(view["options"].as_array().unwrap().len(), 5);
    assert_eq!(view["action"], "/api/v1/feedback/experience/rating");
    // First question: the back link is the journey start.
    assert_eq!(view["back_link"], "/api/v1/feedback");
    assert_eq!(view["progress"]["position"], 1);
    assert!(view.get("error").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_segments_return_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(&app, "/api/v1/feedback/experience/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/api/v1/feedback/nope/rating").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // A question only resolves under its own section.
    let response = get(&app, "/api/v1/feedback/contact/rating").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_required_answer_renders_inline_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_form(&app, "/api/v1/feedback/experience/rating", "rating=", None).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["data"]["error"]["field"], "rating");
    assert_eq!(json["data"]["error"]["message"], "Select how satisfied you were");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_option_renders_inline_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response =
        post_form(&app, "/api/v1/feedback/experience/rating", "rating=9", None).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["error"]["message"],
        "Select a rating from the list"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn valid_answer_advances_and_prefills_on_revisit(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response =
        post_form(&app, "/api/v1/feedback/experience/rating", "rating=4", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/feedback/experience/comments");

    let cookie = session_cookie(&response).unwrap();
    let response =
        get_with_cookie(&app, "/api/v1/feedback/experience/rating", &cookie).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["answer"], "4");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn declining_contact_skips_straight_to_check_answers(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut cookie = None;

    answer(&app, &mut cookie, "/api/v1/feedback/experience/rating", "rating=4").await;
    let response = answer(
        &app,
        &mut cookie,
        "/api/v1/feedback/contact/can-we-contact-you",
        "wants_contact=no",
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/feedback/check-answers");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn accepting_contact_routes_into_contact_details(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut cookie = None;

    let response = answer(
        &app,
        &mut cookie,
        "/api/v1/feedback/contact/can-we-contact-you",
        "wants_contact=yes",
    )
    .await;
    assert_eq!(location(&response), "/api/v1/feedback/contact-details/name");

    // The conditional section's questions validate like any other.
    let response = answer(
        &app,
        &mut cookie,
        "/api/v1/feedback/contact-details/email",
        "email=not-an-email",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["error"]["message"],
        "Enter an email address in the correct format"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn check_answers_lists_active_rows_and_completion(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    // Fresh session: nothing answered, journey incomplete.
    let response = get(&app, "/api/v1/feedback/check-answers").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["complete"], false);

    let cookie = common::complete_feedback_journey(&app).await;
    let response = get_with_cookie(&app, "/api/v1/feedback/check-answers", &cookie).await;
    let json = body_json(response).await;

    assert_eq!(json["data"]["complete"], true);
    let rows = json["data"]["rows"].as_array().unwrap();
    // Contact declined: the contact-details questions are inactive.
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["field_name"], "rating");
    assert_eq!(rows[2]["field_name"], "wants_contact");
    assert_eq!(rows[2]["answer"], "No");
    assert_eq!(
        rows[0]["change_link"],
        "/api/v1/feedback/experience/rating"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn going_back_and_changing_an_answer_reroutes_navigation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut cookie = None;

    answer(&app, &mut cookie, "/api/v1/feedback/experience/rating", "rating=4").await;
    answer(&app, &mut cookie, "/api/v1/feedback/experience/comments", "comments=Fine").await;
    answer(
        &app,
        &mut cookie,
        "/api/v1/feedback/contact/can-we-contact-you",
        "wants_contact=yes",
    )
    .await;
    answer(
        &app,
        &mut cookie,
        "/api/v1/feedback/contact-details/name",
        "name=Sam",
    )
    .await;

    // Back up and decline contact: the next target recomputes against
    // the updated answers and the contact-details section disappears.
    let response = answer(
        &app,
        &mut cookie,
        "/api/v1/feedback/contact/can-we-contact-you",
        "wants_contact=no",
    )
    .await;
    assert_eq!(location(&response), "/api/v1/feedback/check-answers");

    let cookie = cookie.unwrap();
    let response = get_with_cookie(&app, "/api/v1/feedback/check-answers", &cookie).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["complete"], true);
    let rows = json["data"]["rows"].as_array().unwrap();
    assert!(rows.iter().all(|r| r["field_name"] != "name"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn confirmation_without_a_submit_steers_back_to_start(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/feedback/confirmation").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/feedback");
}
