//! HTTP-level integration tests for the single-field edit flow.
//!
//! Records are created via the repository layer to set up scenarios,
//! then edited through the HTTP API.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_with_cookie, location, post_form, session_cookie};
use intake_db::models::submission::CreateSubmission;
use intake_db::repositories::SubmissionRepo;
use sqlx::PgPool;

fn new_submission(reference: &str) -> CreateSubmission {
    CreateSubmission {
        reference: reference.to_string(),
        rating: 4,
        comments: Some("Quick and clear".to_string()),
        name: Some("Sam".to_string()),
        email: Some("sam@example.com".to_string()),
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_get_seeds_the_answer_from_the_record(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("EDITREF1"))
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/submissions/{}/edit/experience/rating", submission.id);
    let response = get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let view = &json["data"];
    assert_eq!(view["field_name"], "rating");
    assert_eq!(view["answer"], "4");
    assert_eq!(view["action"], uri);
    // Edit mode: the back link is the record's detail page, not the
    // previous question.
    assert_eq!(
        view["back_link"],
        format!("/api/v1/submissions/{}", submission.id)
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_get_404s_for_unknown_and_soft_deleted_records(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("EDITREF2"))
        .await
        .unwrap();
    SubmissionRepo::soft_delete(&pool, submission.id).await.unwrap();
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/submissions/{}/edit/experience/rating", submission.id);
    let response = get(&app, &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/api/v1/submissions/99999/edit/experience/rating").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_post_valid_rating_updates_exactly_that_field(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("EDITREF3"))
        .await
        .unwrap();
    let app = common::build_test_app(pool.clone());

    let uri = format!("/api/v1/submissions/{}/edit/experience/rating", submission.id);
    let response = post_form(&app, &uri, "rating=5", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/api/v1/submissions/{}", submission.id)
    );

    let updated = SubmissionRepo::find_by_id(&pool, submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.rating, 5);
    // Everything else is untouched.
    assert_eq!(updated.comments.as_deref(), Some("Quick and clear"));
    assert_eq!(updated.email.as_deref(), Some("sam@example.com"));
    assert!(updated.updated_at >= submission.updated_at);

    // The detail page carries the one-shot success flash.
    let cookie = session_cookie(&response).unwrap();
    let detail = get_with_cookie(
        &app,
        &format!("/api/v1/submissions/{}", submission.id),
        &cookie,
    )
    .await;
    let json = body_json(detail).await;
    assert_eq!(json["data"]["flash"]["kind"], "updated");
    assert_eq!(json["data"]["flash"]["reference"], "EDITREF3");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_post_invalid_value_redirects_back_and_leaves_the_record(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("EDITREF4"))
        .await
        .unwrap();
    let app = common::build_test_app(pool.clone());

    let uri = format!("/api/v1/submissions/{}/edit/experience/rating", submission.id);
    let response = post_form(&app, &uri, "rating=", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), uri);

    let unchanged = SubmissionRepo::find_by_id(&pool, submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.rating, 4);

    // Revisiting the question surfaces the error inline, once.
    let cookie = session_cookie(&response).unwrap();
    let response = get_with_cookie(&app, &uri, &cookie).await;
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["error"]["message"],
        "Select how satisfied you were"
    );

    let response = get_with_cookie(&app, &uri, &cookie).await;
    let json = body_json(response).await;
    assert!(json["data"].get("error").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_post_outside_the_allow_list_is_rejected_without_validation(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("EDITREF5"))
        .await
        .unwrap();
    let app = common::build_test_app(pool.clone());

    // `email` resolves as a question but is not editable. Even an
    // invalid value must not produce a validation response; the request
    // is steered to the detail page with the record untouched.
    let uri = format!(
        "/api/v1/submissions/{}/edit/contact-details/email",
        submission.id
    );
    let response = post_form(&app, &uri, "email=not-an-email", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/api/v1/submissions/{}", submission.id)
    );

    let unchanged = SubmissionRepo::find_by_id(&pool, submission.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.email.as_deref(), Some("sam@example.com"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_post_can_clear_optional_comments(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("EDITREF6"))
        .await
        .unwrap();
    let app = common::build_test_app(pool.clone());

    let uri = format!(
        "/api/v1/submissions/{}/edit/experience/comments",
        submission.id
    );
    let response = post_form(&app, &uri, "comments=", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = SubmissionRepo::find_by_id(&pool, submission.id)
        .await
        .unwrap()
        .unwrap();
    // Cleared to NULL, not stored as an empty string.
    assert_eq!(updated.comments, None);
    assert_eq!(updated.rating, 4);
}
