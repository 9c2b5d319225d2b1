//! The per-question validation pipeline.
//!
//! Rules run in declaration order and the first failure is returned;
//! later rules may assume every earlier rule passed (a length check can
//! assume non-empty, for example). When all rules pass the submitted
//! input is coerced into a typed [`AnswerValue`]. The pipeline performs
//! no I/O.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use validator::ValidateEmail;

use crate::answers::AnswerValue;
use crate::question::{DisplayType, QuestionDefinition};

/// A single validation rule with its user-facing failure message.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The field must be present and non-blank. For group questions,
    /// every declared sub-field must be non-blank.
    Required { message: String },
    /// The trimmed value must not exceed `max` characters.
    MaxLength { max: usize, message: String },
    /// The value must be a syntactically valid email address.
    Email { message: String },
    /// The value must be one of the question's option values.
    OneOf { message: String },
}

impl Rule {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required {
            message: message.into(),
        }
    }

    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::MaxLength {
            max,
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::Email {
            message: message.into(),
        }
    }

    pub fn one_of(message: impl Into<String>) -> Self {
        Self::OneOf {
            message: message.into(),
        }
    }
}

/// The raw form fields submitted for a single question.
///
/// Plain questions arrive under the question's `field_name`; group
/// questions submit each declared sub-field under its own name.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    fields: BTreeMap<String, String>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded form pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Convenience constructor for a single-field submission.
    pub fn single(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::from_pairs([(field.into(), value.into())])
    }

    /// The trimmed value of a field; `None` when the field was absent.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(|v| v.trim())
    }
}

/// A validation failure: the offending field plus its message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Run a question's rules against the submitted input.
///
/// Returns the first failing rule's message, or the coerced typed value
/// when every rule passes. Blank input on choice, boolean, date, and
/// group questions is invalid regardless of rules; optional questions of
/// those types are expressed with an activation condition instead.
pub fn validate(
    question: &QuestionDefinition,
    raw: &RawInput,
) -> Result<AnswerValue, FieldError> {
    let value = raw.get(&question.field_name).unwrap_or("");

    for rule in &question.rules {
        match rule {
            Rule::Required { message } => {
                let blank = match question.display_type {
                    DisplayType::Group => question
                        .group_fields
                        .iter()
                        .any(|f| raw.get(f).unwrap_or("").is_empty()),
                    _ => value.is_empty(),
                };
                if blank {
                    return Err(FieldError::new(&question.field_name, message.clone()));
                }
            }
            Rule::MaxLength { max, message } => {
                let too_long = match question.display_type {
                    DisplayType::Group => question
                        .group_fields
                        .iter()
                        .any(|f| raw.get(f).unwrap_or("").chars().count() > *max),
                    _ => value.chars().count() > *max,
                };
                if too_long {
                    return Err(FieldError::new(&question.field_name, message.clone()));
                }
            }
            Rule::Email { message } => {
                if !value.is_empty() && !value.validate_email() {
                    return Err(FieldError::new(&question.field_name, message.clone()));
                }
            }
            Rule::OneOf { message } => {
                if !value.is_empty()
                    && !question.options.iter().any(|o| o.value == value)
                {
                    return Err(FieldError::new(&question.field_name, message.clone()));
                }
            }
        }
    }

    coerce(question, raw, value)
}

/// Coerce validated input into its typed answer value.
fn coerce(
    question: &QuestionDefinition,
    raw: &RawInput,
    value: &str,
) -> Result<AnswerValue, FieldError> {
    match question.display_type {
        DisplayType::Text | DisplayType::Textarea => Ok(AnswerValue::Text(value.to_string())),
        DisplayType::Radio => {
            if value.is_empty() {
                Err(FieldError::new(&question.field_name, "Select an option"))
            } else {
                Ok(AnswerValue::Choice(value.to_string()))
            }
        }
        DisplayType::Boolean => match value {
            "true" | "yes" => Ok(AnswerValue::Bool(true)),
            "false" | "no" => Ok(AnswerValue::Bool(false)),
            _ => Err(FieldError::new(&question.field_name, "Select yes or no")),
        },
        DisplayType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(AnswerValue::Date)
            .map_err(|_| {
                FieldError::new(&question.field_name, "Enter a date like 2025-01-31")
            }),
        DisplayType::Group => {
            let fields: BTreeMap<String, String> = question
                .group_fields
                .iter()
                .map(|f| (f.clone(), raw.get(f).unwrap_or("").to_string()))
                .collect();
            Ok(AnswerValue::Group(fields))
        }
    }
}
