//! Journey navigation: resolving questions and computing next/previous
//! targets, completion, and mode-dependent paths.
//!
//! Navigation is recomputed from the current answers on every call.
//! There is no cached progress flag: going back and changing an answer
//! that deactivates a later section changes the active list, the next
//! target, and the completion requirement on the very next evaluation.

use crate::answers::Answers;
use crate::question::QuestionDefinition;
use crate::section::Section;
use crate::types::DbId;

/// Which flow a journey instance is serving.
///
/// Base path and back link are pure functions of the mode; the journey
/// definition itself is shared unchanged between both flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyMode {
    /// First-time collection; answers live in the session.
    Create,
    /// Restricted single-field edit of a persisted record; answers are
    /// seeded from the record, never from the session.
    Edit { submission_id: DbId },
}

/// The full ordered sequence of sections and questions for one form type.
#[derive(Debug, Clone)]
pub struct Journey {
    /// Session-store namespace key; must not collide with any other
    /// journey available in the same session.
    pub id: String,
    pub title: String,
    pub sections: Vec<Section>,
}

impl Journey {
    /// Base path for the mode, relative to the API mount point.
    pub fn base_path(&self, mode: JourneyMode) -> String {
        match mode {
            JourneyMode::Create => format!("/{}", self.id),
            JourneyMode::Edit { submission_id } => {
                format!("/submissions/{submission_id}/edit")
            }
        }
    }

    /// Path of one question under the mode's base path.
    pub fn question_path(
        &self,
        mode: JourneyMode,
        section: &Section,
        question: &QuestionDefinition,
    ) -> String {
        format!(
            "{}/{}/{}",
            self.base_path(mode),
            section.url_segment,
            question.url_segment
        )
    }

    /// The "check your answers" target for the create flow; for the edit
    /// flow this is the record's detail page.
    pub fn check_answers_path(&self, mode: JourneyMode) -> String {
        match mode {
            JourneyMode::Create => format!("{}/check-answers", self.base_path(mode)),
            JourneyMode::Edit { submission_id } => format!("/submissions/{submission_id}"),
        }
    }

    /// Resolve URL segments to exactly one question, or `None`.
    ///
    /// Resolution never mutates anything; calling it twice with the same
    /// segments yields the same definition.
    pub fn resolve(
        &self,
        section_segment: &str,
        question_segment: &str,
    ) -> Option<(&Section, &QuestionDefinition)> {
        let section = self
            .sections
            .iter()
            .find(|s| s.url_segment == section_segment)?;
        let question = section
            .questions
            .iter()
            .find(|q| q.url_segment == question_segment)?;
        Some((section, question))
    }

    /// Locate a question by its field name.
    pub fn find_field(&self, field_name: &str) -> Option<(&Section, &QuestionDefinition)> {
        self.sections.iter().find_map(|s| {
            s.questions
                .iter()
                .find(|q| q.field_name == field_name)
                .map(|q| (s, q))
        })
    }

    /// The ordered list of active questions across all active sections.
    pub fn active_questions(&self, answers: &Answers) -> Vec<(&Section, &QuestionDefinition)> {
        self.sections
            .iter()
            .flat_map(|s| {
                s.active_questions(answers)
                    .into_iter()
                    .map(move |q| (s, q))
            })
            .collect()
    }

    /// Path of the first active question, or check-answers when nothing
    /// is active.
    pub fn first_target(&self, mode: JourneyMode, answers: &Answers) -> String {
        match self.active_questions(answers).first() {
            Some((section, question)) => self.question_path(mode, section, question),
            None => self.check_answers_path(mode),
        }
    }

    /// The first active question strictly after `current_field` in
    /// declaration order; check-answers when there is none.
    ///
    /// The current question itself need not be active any more (its
    /// answer may just have deactivated it); navigation still moves
    /// forward from its declared position.
    pub fn next_target(
        &self,
        mode: JourneyMode,
        current_field: &str,
        answers: &Answers,
    ) -> String {
        let mut seen_current = false;
        for section in &self.sections {
            for question in &section.questions {
                if seen_current
                    && section.is_active(answers)
                    && question.is_active(answers)
                {
                    return self.question_path(mode, section, question);
                }
                if question.field_name == current_field {
                    seen_current = true;
                }
            }
        }
        self.check_answers_path(mode)
    }

    /// The last active question strictly before `current_field`, or
    /// `None` when the current question is first.
    pub fn previous_target(
        &self,
        mode: JourneyMode,
        current_field: &str,
        answers: &Answers,
    ) -> Option<String> {
        let mut previous: Option<String> = None;
        for section in &self.sections {
            for question in &section.questions {
                if question.field_name == current_field {
                    return previous;
                }
                if section.is_active(answers) && question.is_active(answers) {
                    previous = Some(self.question_path(mode, section, question));
                }
            }
        }
        None
    }

    /// Back link for a question page.
    ///
    /// In edit mode this is always the record's detail page, never the
    /// generic previous question.
    pub fn back_link(
        &self,
        mode: JourneyMode,
        current_field: &str,
        answers: &Answers,
    ) -> String {
        match mode {
            JourneyMode::Edit { submission_id } => format!("/submissions/{submission_id}"),
            JourneyMode::Create => self
                .previous_target(mode, current_field, answers)
                .unwrap_or_else(|| self.base_path(mode)),
        }
    }

    /// A journey is complete iff every active question has an answer.
    pub fn is_complete(&self, answers: &Answers) -> bool {
        self.active_questions(answers)
            .iter()
            .all(|(_, q)| answers.contains(&q.field_name))
    }

    /// One-based position of `current_field` in the active list, with
    /// the active total. `None` when the question is not active.
    pub fn progress(&self, current_field: &str, answers: &Answers) -> Option<(usize, usize)> {
        let active = self.active_questions(answers);
        let total = active.len();
        active
            .iter()
            .position(|(_, q)| q.field_name == current_field)
            .map(|i| (i + 1, total))
    }
}
