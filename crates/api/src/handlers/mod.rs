//! Request handlers.
//!
//! `journey` renders and advances the create flow one question at a
//! time, `save` commits a completed journey, `edit` applies restricted
//! single-field updates to a persisted submission, and `manage` covers
//! list/detail/soft-delete.

pub mod edit;
pub mod journey;
pub mod manage;
pub mod save;

/// Prefix a core-computed path with the API mount point.
///
/// Navigation paths are computed relative to the mount so the same
/// journey definition serves the create and edit base paths; redirects
/// and links leave through this helper.
pub(crate) fn api_path(path: &str) -> String {
    format!("/api/v1{path}")
}
