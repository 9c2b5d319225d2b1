//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod form_session_repo;
pub mod submission_repo;

pub use form_session_repo::FormSessionRepo;
pub use submission_repo::SubmissionRepo;
