//! The edit flow: restricted single-field updates to a submission.
//!
//! The same question and validation definitions as the create flow,
//! but answers are seeded from the persisted record on every request
//! and never touch the session's journey namespace. Each POST commits
//! exactly one allow-listed field; everything else about the record is
//! left untouched.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};

use intake_core::error::CoreError;
use intake_core::feedback::{feedback_journey, EDITABLE_FIELDS, FIELD_COMMENTS, FIELD_RATING};
use intake_core::flash::Flash;
use intake_core::journey::JourneyMode;
use intake_core::mapping;
use intake_core::types::DbId;
use intake_core::validation::{validate, FieldError, RawInput};
use intake_core::answers::AnswerValue;
use intake_db::models::submission::SubmissionUpdate;
use intake_db::repositories::SubmissionRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::api_path;
use crate::handlers::journey::{question_not_found, question_view};
use crate::response::DataResponse;
use crate::session::SessionContext;
use crate::state::AppState;

fn submission_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Submission",
        id: id.to_string(),
    }
}

/// GET /submissions/{id}/edit/{section}/{question}
///
/// Render one question seeded from the persisted record. Soft-deleted
/// or unknown submissions are a 404, as are unknown segments. The back
/// link always points at the record's detail page.
pub async fn show(
    session: SessionContext,
    State(state): State<AppState>,
    Path((id, section, question)): Path<(DbId, String, String)>,
) -> AppResult<Response> {
    let journey = feedback_journey();
    let mode = JourneyMode::Edit { submission_id: id };

    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| submission_not_found(id))?;
    let (sec, q) = journey
        .resolve(&section, &question)
        .ok_or_else(|| question_not_found(&section, &question))?;

    let answers = mapping::to_answers(&submission.to_fields());

    // A failed edit POST leaves its message in the flash; surface it
    // inline against this question.
    let error = match session.take_flash().await? {
        Some(Flash::Error { message }) => Some(FieldError {
            field: q.field_name.clone(),
            message,
        }),
        _ => None,
    };

    let view = question_view(journey, mode, sec, q, &answers, error);
    Ok(Json(DataResponse { data: view }).into_response())
}

/// POST /submissions/{id}/edit/{section}/{question}
///
/// Validate and persist exactly one field. The field must be on the
/// edit allow-list; a crafted request naming any other question is
/// turned away before validators run, with the record untouched.
pub async fn update(
    session: SessionContext,
    State(state): State<AppState>,
    Path((id, section, question)): Path<(DbId, String, String)>,
    Form(form): Form<BTreeMap<String, String>>,
) -> AppResult<Redirect> {
    let journey = feedback_journey();
    let mode = JourneyMode::Edit { submission_id: id };
    let detail_path = api_path(&format!("/submissions/{id}"));

    SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| submission_not_found(id))?;
    let (sec, q) = journey
        .resolve(&section, &question)
        .ok_or_else(|| question_not_found(&section, &question))?;

    if !EDITABLE_FIELDS.contains(&q.field_name.as_str()) {
        tracing::warn!(
            submission_id = id,
            field = %q.field_name,
            "Rejected edit of a field outside the allow-list"
        );
        return Ok(Redirect::to(&detail_path));
    }

    let raw = RawInput::from_pairs(form);
    let value = match validate(q, &raw) {
        Ok(value) => value,
        Err(error) => {
            session.set_flash(&Flash::error(error.message)).await?;
            return Ok(Redirect::to(&api_path(&journey.question_path(mode, sec, q))));
        }
    };

    let update = field_update(&q.field_name, &value)?;
    match SubmissionRepo::update_field(&state.pool, id, &update).await {
        Ok(Some(updated)) => {
            tracing::info!(
                submission_id = id,
                field = %q.field_name,
                "Submission field updated"
            );
            session.set_flash(&Flash::updated(updated.reference.clone())).await?;
            Ok(Redirect::to(&detail_path))
        }
        Ok(None) => {
            // The row was deleted between the lookup and the update.
            session
                .set_flash(&Flash::error("This submission could not be updated."))
                .await?;
            Ok(Redirect::to(&detail_path))
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                submission_id = id,
                field = %q.field_name,
                "Failed to update submission field"
            );
            session
                .set_flash(&Flash::error(
                    "This submission could not be updated. Please try again.",
                ))
                .await?;
            Ok(Redirect::to(&detail_path))
        }
    }
}

/// Translate a validated answer into the matching single-column update.
fn field_update(field_name: &str, value: &AnswerValue) -> Result<SubmissionUpdate, AppError> {
    match (field_name, value) {
        (FIELD_RATING, AnswerValue::Choice(v)) => v
            .parse::<i32>()
            .map(SubmissionUpdate::Rating)
            .map_err(|_| AppError::Internal(format!("rating answer '{v}' is not numeric"))),
        (FIELD_COMMENTS, AnswerValue::Text(t)) => {
            let trimmed = t.trim();
            Ok(SubmissionUpdate::Comments(if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }))
        }
        (field, value) => Err(AppError::Internal(format!(
            "no column mapping for editable field '{field}' with value {value:?}"
        ))),
    }
}
