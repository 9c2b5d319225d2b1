//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the
//! database row plus the DTOs the repositories accept.

pub mod form_session;
pub mod submission;
