//! Mapping between completed answers and persisted submission fields.
//!
//! This module is the single source of truth for field-name translation
//! between the journey and the `submissions` table. The contact opt-in
//! boolean has no column of its own: it collapses into the nullable
//! `name`/`email` columns on write and is reconstructed from their
//! presence on read.

use serde::{Deserialize, Serialize};

use crate::answers::{AnswerValue, Answers};
use crate::error::CoreError;
use crate::feedback::{
    FIELD_COMMENTS, FIELD_EMAIL, FIELD_NAME, FIELD_RATING, FIELD_WANTS_CONTACT,
};

/// The persisted field values of one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionFields {
    pub rating: i32,
    pub comments: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Map a completed answer set to persisted fields.
///
/// Optional empty strings normalize to `None`, never `Some("")`, so
/// list and detail rendering can treat NULL uniformly as "not
/// provided". Contact details are dropped when contact was declined,
/// whatever may be left in the answers.
pub fn to_fields(answers: &Answers) -> Result<SubmissionFields, CoreError> {
    let rating = match answers.get(FIELD_RATING) {
        Some(AnswerValue::Choice(v)) => v.parse::<i32>().map_err(|_| {
            CoreError::Internal(format!("rating answer '{v}' is not numeric"))
        })?,
        _ => {
            return Err(CoreError::Validation(
                "A rating is required before saving".to_string(),
            ))
        }
    };

    let comments = match answers.get(FIELD_COMMENTS) {
        Some(AnswerValue::Text(t)) => normalize(t),
        _ => None,
    };

    let wants_contact =
        answers.get(FIELD_WANTS_CONTACT) == Some(&AnswerValue::Bool(true));

    let (name, email) = if wants_contact {
        let name = match answers.get(FIELD_NAME) {
            Some(AnswerValue::Text(t)) => normalize(t),
            _ => None,
        };
        let email = match answers.get(FIELD_EMAIL) {
            Some(AnswerValue::Text(t)) => normalize(t),
            _ => None,
        };
        (name, email)
    } else {
        (None, None)
    };

    Ok(SubmissionFields {
        rating,
        comments,
        name,
        email,
    })
}

/// The inverse mapping: seed an answer set from persisted fields.
///
/// Every persisted value reappears under its journey field name, and
/// the contact opt-in is reconstructed from the presence of contact
/// details. Absent columns stay absent from the answers.
pub fn to_answers(fields: &SubmissionFields) -> Answers {
    let mut answers = Answers::new();
    answers.insert(
        FIELD_RATING,
        AnswerValue::Choice(fields.rating.to_string()),
    );
    if let Some(comments) = &fields.comments {
        answers.insert(FIELD_COMMENTS, AnswerValue::Text(comments.clone()));
    }

    let wants_contact = fields.name.is_some() || fields.email.is_some();
    answers.insert(FIELD_WANTS_CONTACT, AnswerValue::Bool(wants_contact));
    if let Some(name) = &fields.name {
        answers.insert(FIELD_NAME, AnswerValue::Text(name.clone()));
    }
    if let Some(email) = &fields.email {
        answers.insert(FIELD_EMAIL, AnswerValue::Text(email.clone()));
    }
    answers
}

/// Trim and collapse empty optional text to `None`.
fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
