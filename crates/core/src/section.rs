//! Named, ordered groups of questions within a journey.

use crate::answers::Answers;
use crate::question::{Condition, QuestionDefinition};

/// An ordered group of questions, optionally gated by a predicate over
/// the in-progress answers.
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    /// Unique within the journey; the first URL path segment.
    pub url_segment: String,
    /// Section-level activation predicate; `None` means always active.
    pub condition: Option<Condition>,
    pub questions: Vec<QuestionDefinition>,
}

impl Section {
    /// Whether the section itself is active for the given answers.
    pub fn is_active(&self, answers: &Answers) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |c| c.is_met(answers))
    }

    /// The section's currently active questions, in declaration order.
    ///
    /// Empty when the section predicate is unmet, and also when every
    /// question's own condition filters it out; either way the section
    /// is skipped entirely during navigation.
    pub fn active_questions(&self, answers: &Answers) -> Vec<&QuestionDefinition> {
        if !self.is_active(answers) {
            return Vec::new();
        }
        self.questions
            .iter()
            .filter(|q| q.is_active(answers))
            .collect()
    }
}
