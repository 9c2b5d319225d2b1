//! The save flow: commit a completed journey as a submission.
//!
//! Steering cases (empty or incomplete answers) are plain redirects.
//! After completeness is confirmed, any persistence failure becomes a
//! sanitized error flash and a redirect back to check-answers with the
//! session answers intact, so the respondent can retry without
//! re-entering anything.

use axum::extract::State;
use axum::response::Redirect;
use rand::Rng;

use intake_core::answers::Answers;
use intake_core::feedback::feedback_journey;
use intake_core::flash::Flash;
use intake_core::journey::JourneyMode;
use intake_core::mapping;
use intake_db::models::submission::{CreateSubmission, Submission};
use intake_db::repositories::SubmissionRepo;
use intake_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::handlers::api_path;
use crate::session::SessionContext;
use crate::state::AppState;

/// Reference alphabet: uppercase without the lookalikes I, L, O, U.
const REFERENCE_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTVWXYZ23456789";

/// Length of a generated reference code.
const REFERENCE_LEN: usize = 8;

/// Attempts before giving up on reference collisions.
const CREATE_ATTEMPTS: usize = 3;

/// POST /feedback/submit
pub async fn submit(
    session: SessionContext,
    State(state): State<AppState>,
) -> AppResult<Redirect> {
    let journey = feedback_journey();
    let mode = JourneyMode::Create;

    let answers = session.answers(&journey.id).await?;

    // Steering, not faults. An empty answer set means the session
    // expired (or the journey never started): back to the start. An
    // incomplete one returns to check-answers. No error is recorded
    // for either.
    if answers.is_empty() {
        return Ok(Redirect::to(&api_path(&journey.base_path(mode))));
    }
    if !journey.is_complete(&answers) {
        return Ok(Redirect::to(&api_path(&journey.check_answers_path(mode))));
    }

    match persist_submission(&state.pool, &answers).await {
        Ok(submission) => {
            // Best-effort notification: the submission is already
            // saved, so a delivery failure is logged and swallowed
            // rather than shown as a save failure (which would invite
            // a duplicate re-submit).
            if let Err(err) = state.notifier.notify(&submission).await {
                tracing::error!(
                    error = %err,
                    reference = %submission.reference,
                    "Submission notification failed; submission is saved"
                );
            }

            tracing::info!(
                submission_id = submission.id,
                reference = %submission.reference,
                "Feedback submission committed"
            );

            session.set_flash(&Flash::submitted(submission.reference.clone())).await?;
            session.clear_answers(&journey.id).await?;
            Ok(Redirect::to(&api_path(&format!(
                "{}/confirmation",
                journey.base_path(mode)
            ))))
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to persist feedback submission");
            session
                .set_flash(&Flash::error(
                    "Your feedback could not be saved. Please try again.",
                ))
                .await?;
            // Answers are deliberately kept for the retry.
            Ok(Redirect::to(&api_path(&journey.check_answers_path(mode))))
        }
    }
}

/// Map the answers and insert the submission, regenerating the
/// reference on the (unlikely) unique-constraint collision.
async fn persist_submission(
    pool: &DbPool,
    answers: &Answers,
) -> Result<Submission, AppError> {
    let fields = mapping::to_fields(answers)?;

    let mut last_err: Option<sqlx::Error> = None;
    for _ in 0..CREATE_ATTEMPTS {
        let input = CreateSubmission::from_fields(generate_reference(), &fields);
        match SubmissionRepo::create(pool, &input).await {
            Ok(submission) => return Ok(submission),
            Err(err) if is_reference_collision(&err) => {
                tracing::warn!(reference = %input.reference, "Reference collision, regenerating");
                last_err = Some(err);
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(AppError::Database(last_err.expect("at least one attempt ran")))
}

fn generate_reference() -> String {
    let mut rng = rand::rng();
    (0..REFERENCE_LEN)
        .map(|_| REFERENCE_ALPHABET[rng.random_range(0..REFERENCE_ALPHABET.len())] as char)
        .collect()
}

fn is_reference_collision(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("uq_submissions_reference")
    )
}
