//! Handlers for the feedback journey's create flow.
//!
//! One question per page: GET renders a question with the current
//! answer filled in, POST validates the submitted field, merge-writes
//! it into the session, and redirects to the next active question.
//! Validation failures re-render inline and never touch the flash
//! channel.

use std::collections::BTreeMap;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::Serialize;

use intake_core::answers::Answers;
use intake_core::error::CoreError;
use intake_core::feedback::feedback_journey;
use intake_core::flash::Flash;
use intake_core::journey::{Journey, JourneyMode};
use intake_core::question::{DisplayType, QuestionDefinition, QuestionOption};
use intake_core::section::Section;
use intake_core::validation::{validate, FieldError, RawInput};

use crate::error::AppResult;
use crate::handlers::api_path;
use crate::response::DataResponse;
use crate::session::SessionContext;

// ---------------------------------------------------------------------------
// Render models
// ---------------------------------------------------------------------------

/// Render model for a single question page.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub journey: String,
    pub section: String,
    pub question: String,
    pub field_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub display_type: DisplayType,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub group_fields: Vec<String>,
    /// The current answer in form-input representation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Where the form posts back to.
    pub action: String,
    pub back_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    /// Inline validation failure for this question, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

/// One row of the check-answers summary.
#[derive(Debug, Serialize)]
pub struct AnswerRow {
    pub field_name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub change_link: String,
}

/// Render model for the check-answers page.
#[derive(Debug, Serialize)]
pub struct CheckAnswersView {
    pub title: String,
    pub rows: Vec<AnswerRow>,
    /// Whether every active question has an answer; the submit button
    /// is only enabled when true.
    pub complete: bool,
    pub submit_path: String,
    pub back_link: String,
}

/// Render model for the post-submit confirmation page.
#[derive(Debug, Serialize)]
pub struct ConfirmationView {
    pub reference: String,
}

/// Build the render model for one question in either journey mode.
pub(crate) fn question_view(
    journey: &Journey,
    mode: JourneyMode,
    section: &Section,
    question: &QuestionDefinition,
    answers: &Answers,
    error: Option<FieldError>,
) -> QuestionView {
    QuestionView {
        journey: journey.id.clone(),
        section: section.url_segment.clone(),
        question: question.url_segment.clone(),
        field_name: question.field_name.clone(),
        title: question.title.clone(),
        hint: question.hint.clone(),
        display_type: question.display_type,
        options: question.options.clone(),
        group_fields: question.group_fields.clone(),
        answer: answers.get(&question.field_name).map(|v| v.form_value()),
        action: api_path(&journey.question_path(mode, section, question)),
        back_link: api_path(&journey.back_link(mode, &question.field_name, answers)),
        progress: journey
            .progress(&question.field_name, answers)
            .map(|(position, total)| Progress { position, total }),
        error,
    }
}

pub(crate) fn question_not_found(section: &str, question: &str) -> CoreError {
    CoreError::NotFound {
        entity: "Question",
        id: format!("{section}/{question}"),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /feedback
///
/// Entry point: redirect to the first active question.
pub async fn start(session: SessionContext) -> AppResult<Redirect> {
    let journey = feedback_journey();
    let answers = session.answers(&journey.id).await?;
    let target = journey.first_target(JourneyMode::Create, &answers);
    Ok(Redirect::to(&api_path(&target)))
}

/// GET /feedback/{section}/{question}
///
/// Render one question with the current answer, if any.
pub async fn show_question(
    session: SessionContext,
    Path((section, question)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<QuestionView>>> {
    let journey = feedback_journey();
    let (sec, q) = journey
        .resolve(&section, &question)
        .ok_or_else(|| question_not_found(&section, &question))?;

    let answers = session.answers(&journey.id).await?;
    let view = question_view(journey, JourneyMode::Create, sec, q, &answers, None);
    Ok(Json(DataResponse { data: view }))
}

/// POST /feedback/{section}/{question}
///
/// Validate the submitted field. On failure, re-render the question
/// with the inline error (422). On success, write the field into the
/// session and redirect to the next active question -- computed
/// against the just-updated answers so conditional sections skip or
/// appear immediately.
pub async fn submit_answer(
    session: SessionContext,
    Path((section, question)): Path<(String, String)>,
    Form(form): Form<BTreeMap<String, String>>,
) -> AppResult<Response> {
    let journey = feedback_journey();
    let mode = JourneyMode::Create;
    let (sec, q) = journey
        .resolve(&section, &question)
        .ok_or_else(|| question_not_found(&section, &question))?;

    let raw = RawInput::from_pairs(form);
    match validate(q, &raw) {
        Err(error) => {
            let answers = session.answers(&journey.id).await?;
            let view = question_view(journey, mode, sec, q, &answers, Some(error));
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(DataResponse { data: view }),
            )
                .into_response())
        }
        Ok(value) => {
            let answers = session
                .put_answer(&journey.id, &q.field_name, value)
                .await?;
            let target = journey.next_target(mode, &q.field_name, &answers);
            Ok(Redirect::to(&api_path(&target)).into_response())
        }
    }
}

/// GET /feedback/check-answers
///
/// Summary of every active question and its answer, with change links.
pub async fn check_answers(
    session: SessionContext,
) -> AppResult<Json<DataResponse<CheckAnswersView>>> {
    let journey = feedback_journey();
    let mode = JourneyMode::Create;
    let answers = session.answers(&journey.id).await?;

    let active = journey.active_questions(&answers);
    let rows = active
        .iter()
        .map(|(sec, q)| AnswerRow {
            field_name: q.field_name.clone(),
            title: q.title.clone(),
            answer: answers.get(&q.field_name).map(|v| v.display()),
            change_link: api_path(&journey.question_path(mode, sec, q)),
        })
        .collect();

    let back_link = active
        .last()
        .map(|(sec, q)| api_path(&journey.question_path(mode, sec, q)))
        .unwrap_or_else(|| api_path(&journey.base_path(mode)));

    let view = CheckAnswersView {
        title: journey.title.clone(),
        rows,
        complete: journey.is_complete(&answers),
        submit_path: api_path(&format!("{}/submit", journey.base_path(mode))),
        back_link,
    };
    Ok(Json(DataResponse { data: view }))
}

/// GET /feedback/confirmation
///
/// One-shot success page: consumes the flash written by the save flow.
/// Without a submitted flash (revisit, stale tab) the respondent is
/// steered back to the journey start.
pub async fn confirmation(session: SessionContext) -> AppResult<Response> {
    let journey = feedback_journey();
    match session.take_flash().await? {
        Some(Flash::Submitted { reference }) => Ok(Json(DataResponse {
            data: ConfirmationView { reference },
        })
        .into_response()),
        _ => {
            let target = api_path(&journey.base_path(JourneyMode::Create));
            Ok(Redirect::to(&target).into_response())
        }
    }
}
