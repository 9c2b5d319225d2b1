//! Route definitions for the feedback journey's create flow.
//!
//! Mounted at `/feedback` by `api_routes()`.
//!
//! ```text
//! GET    /                              start (redirect to first question)
//! GET    /check-answers                 check_answers
//! GET    /confirmation                  confirmation (one-shot)
//! POST   /submit                        submit
//! GET    /{section}/{question}          show_question
//! POST   /{section}/{question}          submit_answer
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{journey, save};
use crate::state::AppState;

/// Feedback journey routes -- mounted at `/feedback`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/feedback", get(journey::start))
        .route("/feedback/check-answers", get(journey::check_answers))
        .route("/feedback/confirmation", get(journey::confirmation))
        .route("/feedback/submit", post(save::submit))
        .route(
            "/feedback/{section}/{question}",
            get(journey::show_question).post(journey::submit_answer),
        )
}
