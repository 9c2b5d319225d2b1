pub mod feedback;
pub mod health;
pub mod submissions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /feedback                                        start (redirect to first question)
/// /feedback/check-answers                          summary of answers
/// /feedback/confirmation                           one-shot success page
/// /feedback/submit                                 commit (POST)
/// /feedback/{section}/{question}                   show question, answer question
///
/// /submissions                                     list with total count
/// /submissions/{id}                                detail
/// /submissions/{id}/delete                         confirm page (GET), soft delete (POST)
/// /submissions/{id}/edit/{section}/{question}      edit one field (GET, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(feedback::router())
        .merge(submissions::router())
}
