//! Manage lifecycle handlers: list, detail, and soft delete.
//!
//! Independent of the journey but sharing the same persisted records.
//! List and count come from one read-consistent snapshot so they agree
//! when rendered together; delete failures leave the record unchanged
//! and surface as a flash error, never as a thrown response.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use serde::Serialize;

use intake_core::error::CoreError;
use intake_core::feedback::{feedback_journey, EDITABLE_FIELDS};
use intake_core::flash::Flash;
use intake_core::journey::JourneyMode;
use intake_core::types::DbId;
use intake_db::models::submission::Submission;
use intake_db::repositories::SubmissionRepo;

use crate::error::AppResult;
use crate::handlers::api_path;
use crate::response::DataResponse;
use crate::session::SessionContext;
use crate::state::AppState;

fn submission_not_found(id: DbId) -> CoreError {
    CoreError::NotFound {
        entity: "Submission",
        id: id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Render models
// ---------------------------------------------------------------------------

/// Render model for the submissions list.
#[derive(Debug, Serialize)]
pub struct SubmissionListView {
    pub items: Vec<Submission>,
    pub total_count: i64,
    /// One-shot outcome from a preceding save/edit/delete redirect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// Render model for a single submission's detail page.
#[derive(Debug, Serialize)]
pub struct SubmissionDetailView {
    pub submission: Submission,
    /// Edit links for the allow-listed fields only.
    pub edit_paths: BTreeMap<String, String>,
    pub delete_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

/// Render model for the delete confirmation page.
#[derive(Debug, Serialize)]
pub struct DeleteConfirmView {
    pub submission: Submission,
    pub confirm_path: String,
    pub cancel_path: String,
}

/// Edit links for the fields the edit UI exposes.
fn edit_paths(id: DbId) -> BTreeMap<String, String> {
    let journey = feedback_journey();
    let mode = JourneyMode::Edit { submission_id: id };
    EDITABLE_FIELDS
        .iter()
        .filter_map(|field| journey.find_field(field))
        .map(|(sec, q)| {
            (
                q.field_name.clone(),
                api_path(&journey.question_path(mode, sec, q)),
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /submissions
///
/// Active (non-deleted) submissions newest-first with the total count,
/// plus the one-shot flash if a redirect just landed here.
pub async fn list(
    session: SessionContext,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SubmissionListView>>> {
    let (items, total_count) = SubmissionRepo::list_with_count(&state.pool).await?;
    let flash = session.take_flash().await?;
    Ok(Json(DataResponse {
        data: SubmissionListView {
            items,
            total_count,
            flash,
        },
    }))
}

/// GET /submissions/{id}
///
/// Detail for one active submission; 404 when absent or soft-deleted.
pub async fn detail(
    session: SessionContext,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<SubmissionDetailView>>> {
    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| submission_not_found(id))?;
    let flash = session.take_flash().await?;
    Ok(Json(DataResponse {
        data: SubmissionDetailView {
            edit_paths: edit_paths(submission.id),
            delete_path: api_path(&format!("/submissions/{}/delete", submission.id)),
            submission,
            flash,
        },
    }))
}

/// GET /submissions/{id}/delete
///
/// Confirmation step before the soft delete.
pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteConfirmView>>> {
    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| submission_not_found(id))?;
    Ok(Json(DataResponse {
        data: DeleteConfirmView {
            confirm_path: api_path(&format!("/submissions/{}/delete", submission.id)),
            cancel_path: api_path(&format!("/submissions/{}", submission.id)),
            submission,
        },
    }))
}

/// POST /submissions/{id}/delete
///
/// Soft-delete the submission and return to the list. A failed delete
/// leaves the record unchanged and carries a flash error instead of
/// throwing to the client.
pub async fn delete(
    session: SessionContext,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Redirect> {
    let list_path = api_path("/submissions");

    let submission = SubmissionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| submission_not_found(id))?;

    match SubmissionRepo::soft_delete(&state.pool, id).await {
        Ok(true) => {
            tracing::info!(
                submission_id = id,
                reference = %submission.reference,
                "Submission soft-deleted"
            );
            session.set_flash(&Flash::deleted(submission.reference.clone())).await?;
        }
        Ok(false) => {
            // Lost a race with another delete; the record is already gone
            // from default listings, so report it as not deletable now.
            session
                .set_flash(&Flash::error("This submission has already been deleted."))
                .await?;
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                submission_id = id,
                "Failed to soft-delete submission"
            );
            session
                .set_flash(&Flash::error(
                    "This submission could not be deleted. Please try again.",
                ))
                .await?;
        }
    }

    Ok(Redirect::to(&list_path))
}
