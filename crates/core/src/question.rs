//! Question definitions: the immutable description of one form field.

use serde::Serialize;

use crate::answers::{AnswerValue, Answers};
use crate::validation::Rule;

/// How a question is displayed and which input shape it accepts.
///
/// Validation and coercion dispatch exhaustively on this enum, so adding
/// a display type forces every match site to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayType {
    /// Single-line text input.
    Text,
    /// Multi-line text area.
    Textarea,
    /// Single choice from the question's options.
    Radio,
    /// Yes/no.
    Boolean,
    /// Calendar date (ISO `YYYY-MM-DD` input).
    Date,
    /// Multiple named sub-fields submitted together.
    Group,
}

/// One entry in a choice question's option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOption {
    pub value: String,
    pub label: String,
}

impl QuestionOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Activation predicate over the in-progress answers.
///
/// A predicate that references a field which has not been answered yet
/// evaluates to `false`, never to an error. Linear sections ahead of a
/// conditional branch therefore stay reachable before the controlling
/// answer exists.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The field's answer equals the given value exactly.
    Equals { field: String, value: AnswerValue },
    /// The field holds a boolean `true`.
    IsTrue { field: String },
    /// The field holds a boolean `false` (absent does NOT count).
    IsFalse { field: String },
}

impl Condition {
    pub fn is_met(&self, answers: &Answers) -> bool {
        match self {
            Self::Equals { field, value } => answers.get(field) == Some(value),
            Self::IsTrue { field } => answers.get(field) == Some(&AnswerValue::Bool(true)),
            Self::IsFalse { field } => answers.get(field) == Some(&AnswerValue::Bool(false)),
        }
    }
}

/// Immutable description of one form field.
///
/// Constructed once when the journey is built and shared by reference
/// between the create and edit flows; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct QuestionDefinition {
    /// Unique within a journey; the key used in [`Answers`] and in the
    /// persistence mapping.
    pub field_name: String,
    /// Unique within the question's section; the URL path segment.
    pub url_segment: String,
    /// Question heading shown to the respondent.
    pub title: String,
    /// Optional supporting text under the heading.
    pub hint: Option<String>,
    pub display_type: DisplayType,
    /// Validation rules, run in declaration order (first failure wins).
    pub rules: Vec<Rule>,
    /// Choice sets; empty unless `display_type` is `Radio`.
    pub options: Vec<QuestionOption>,
    /// Named sub-fields; empty unless `display_type` is `Group`.
    pub group_fields: Vec<String>,
    /// Question-level activation predicate, ANDed with the section's.
    pub condition: Option<Condition>,
}

impl QuestionDefinition {
    /// Whether this question is active for the given answers, ignoring
    /// the enclosing section's own predicate.
    pub fn is_active(&self, answers: &Answers) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |c| c.is_met(answers))
    }
}
