//! In-progress answer storage for a journey instance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single submitted answer value.
///
/// Tagged serialization so values keep their type through the session
/// store's JSONB column and back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Free text (single- or multi-line).
    Text(String),
    /// Yes/no answer.
    Bool(bool),
    /// The `value` of a selected option.
    Choice(String),
    /// A calendar date.
    Date(chrono::NaiveDate),
    /// Named sub-fields of a multi-field question.
    Group(BTreeMap<String, String>),
}

impl AnswerValue {
    /// The text form of this value as shown on the check-answers page.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Bool(true) => "Yes".to_string(),
            Self::Bool(false) => "No".to_string(),
            Self::Choice(v) => v.clone(),
            Self::Date(d) => d.format("%-d %B %Y").to_string(),
            Self::Group(fields) => {
                let parts: Vec<&str> = fields.values().map(String::as_str).collect();
                parts.join(", ")
            }
        }
    }

    /// The raw form-input representation, used to pre-fill inputs.
    pub fn form_value(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Choice(v) => v.clone(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Group(fields) => serde_json::to_string(fields).unwrap_or_default(),
        }
    }
}

/// The in-progress set of field values for one journey instance.
///
/// A field that was never answered is absent from the map; absence is
/// distinct from an explicit empty value and both survive the round
/// trip through the session store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    fields: BTreeMap<String, AnswerValue>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the answer for a field, `None` if not yet answered.
    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.fields.get(field)
    }

    /// Whether the field has been answered at all.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Merge-write a single field, replacing any previous answer.
    pub fn insert(&mut self, field: impl Into<String>, value: AnswerValue) {
        self.fields.insert(field.into(), value);
    }

    /// Remove a field's answer, returning it if present.
    pub fn remove(&mut self, field: &str) -> Option<AnswerValue> {
        self.fields.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AnswerValue)> {
        self.fields.iter()
    }
}

impl FromIterator<(String, AnswerValue)> for Answers {
    fn from_iter<I: IntoIterator<Item = (String, AnswerValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
