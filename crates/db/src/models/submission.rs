//! Submission entity model and DTOs.

use intake_core::mapping::SubmissionFields;
use intake_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A submission row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    /// Human-facing reference code shown after a successful save.
    pub reference: String,
    pub rating: i32,
    pub comments: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Submission {
    /// The persisted field values, in the shape the mapping layer and
    /// the edit flow work with.
    pub fn to_fields(&self) -> SubmissionFields {
        SubmissionFields {
            rating: self.rating,
            comments: self.comments.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// DTO for creating a new submission.
#[derive(Debug, Clone)]
pub struct CreateSubmission {
    pub reference: String,
    pub rating: i32,
    pub comments: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreateSubmission {
    /// Build from mapped journey fields plus a generated reference.
    pub fn from_fields(reference: impl Into<String>, fields: &SubmissionFields) -> Self {
        Self {
            reference: reference.into(),
            rating: fields.rating,
            comments: fields.comments.clone(),
            name: fields.name.clone(),
            email: fields.email.clone(),
        }
    }
}

/// A single-column update applied by the edit flow.
///
/// Exactly one field changes per request; the enum keeps the set of
/// updatable columns closed and typed.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionUpdate {
    Rating(i32),
    Comments(Option<String>),
}
