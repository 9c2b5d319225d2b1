//! HTTP-level integration tests for the manage lifecycle: list,
//! detail, and soft delete.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_with_cookie, location, post_empty, session_cookie};
use intake_db::models::submission::CreateSubmission;
use intake_db::repositories::SubmissionRepo;
use sqlx::PgPool;

fn new_submission(reference: &str, rating: i32) -> CreateSubmission {
    CreateSubmission {
        reference: reference.to_string(),
        rating,
        comments: None,
        name: None,
        email: None,
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_is_empty_without_submissions(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/submissions").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["items"].as_array().unwrap().is_empty());
    assert_eq!(json["data"]["total_count"], 0);
    assert!(json["data"].get("flash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_shows_active_submissions_with_agreeing_count(pool: PgPool) {
    SubmissionRepo::create(&pool, &new_submission("LISTREF1", 3))
        .await
        .unwrap();
    let second = SubmissionRepo::create(&pool, &new_submission("LISTREF2", 5))
        .await
        .unwrap();
    SubmissionRepo::soft_delete(&pool, second.id).await.unwrap();

    let app = common::build_test_app(pool);
    let response = get(&app, "/api/v1/submissions").await;
    let json = body_json(response).await;

    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["reference"], "LISTREF1");
    assert_eq!(json["data"]["total_count"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn detail_renders_edit_and_delete_paths(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("DETAIL01", 4))
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get(&app, &format!("/api/v1/submissions/{}", submission.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let view = &json["data"];
    assert_eq!(view["submission"]["reference"], "DETAIL01");
    assert_eq!(
        view["edit_paths"]["rating"],
        format!(
            "/api/v1/submissions/{}/edit/experience/rating",
            submission.id
        )
    );
    assert_eq!(
        view["edit_paths"]["comments"],
        format!(
            "/api/v1/submissions/{}/edit/experience/comments",
            submission.id
        )
    );
    // Only allow-listed fields get edit links.
    assert!(view["edit_paths"].get("email").is_none());
    assert_eq!(
        view["delete_path"],
        format!("/api/v1/submissions/{}/delete", submission.id)
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn detail_404s_for_unknown_and_soft_deleted(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("DETAIL02", 4))
        .await
        .unwrap();
    SubmissionRepo::soft_delete(&pool, submission.id).await.unwrap();
    let app = common::build_test_app(pool);

    let response = get(&app, &format!("/api/v1/submissions/{}", submission.id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(&app, "/api/v1/submissions/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_confirm_page_shows_the_record(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("DELREF01", 2))
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response =
        get(&app, &format!("/api/v1/submissions/{}/delete", submission.id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["submission"]["reference"], "DELREF01");
    assert_eq!(
        json["data"]["confirm_path"],
        format!("/api/v1/submissions/{}/delete", submission.id)
    );
    assert_eq!(
        json["data"]["cancel_path"],
        format!("/api/v1/submissions/{}", submission.id)
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_soft_deletes_and_flashes_once_on_the_list(pool: PgPool) {
    let submission = SubmissionRepo::create(&pool, &new_submission("DELREF02", 2))
        .await
        .unwrap();
    let app = common::build_test_app(pool.clone());

    let response = post_empty(
        &app,
        &format!("/api/v1/submissions/{}/delete", submission.id),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/api/v1/submissions");

    // Hidden from defaults, retained for audit.
    assert!(SubmissionRepo::find_by_id(&pool, submission.id)
        .await
        .unwrap()
        .is_none());
    assert!(SubmissionRepo::find_by_id_include_deleted(&pool, submission.id)
        .await
        .unwrap()
        .is_some());

    // The list consumes the flash exactly once.
    let cookie = session_cookie(&response).unwrap();
    let response = get_with_cookie(&app, "/api/v1/submissions", &cookie).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["flash"]["kind"], "deleted");
    assert_eq!(json["data"]["flash"]["reference"], "DELREF02");

    let response = get_with_cookie(&app, "/api/v1/submissions", &cookie).await;
    let json = body_json(response).await;
    assert!(json["data"].get("flash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_unknown_id_is_a_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_empty(&app, "/api/v1/submissions/99999/delete", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
