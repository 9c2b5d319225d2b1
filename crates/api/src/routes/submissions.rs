//! Route definitions for submission management and the edit flow.
//!
//! Mounted at `/submissions` by `api_routes()`.
//!
//! ```text
//! GET    /                              list
//! GET    /{id}                          detail
//! GET    /{id}/delete                   delete_confirm
//! POST   /{id}/delete                   delete (soft)
//! GET    /{id}/edit/{section}/{question}  edit::show
//! POST   /{id}/edit/{section}/{question}  edit::update
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{edit, manage};
use crate::state::AppState;

/// Submission management routes -- mounted at `/submissions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submissions", get(manage::list))
        .route("/submissions/{id}", get(manage::detail))
        .route(
            "/submissions/{id}/delete",
            get(manage::delete_confirm).post(manage::delete),
        )
        .route(
            "/submissions/{id}/edit/{section}/{question}",
            get(edit::show).post(edit::update),
        )
}
