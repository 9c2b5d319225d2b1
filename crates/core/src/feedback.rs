//! The feedback journey definition.
//!
//! Three sections: the experience questions, the contact opt-in, and a
//! conditional contact-details section that only activates when the
//! respondent asked to be contacted.

use std::sync::OnceLock;

use crate::journey::Journey;
use crate::question::{Condition, DisplayType, QuestionDefinition, QuestionOption};
use crate::section::Section;
use crate::validation::Rule;

/// Session-store namespace for the create flow. The edit flow never
/// writes session answers, so this namespace has a single writer.
pub const JOURNEY_ID: &str = "feedback";

pub const FIELD_RATING: &str = "rating";
pub const FIELD_COMMENTS: &str = "comments";
pub const FIELD_WANTS_CONTACT: &str = "wants_contact";
pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";

/// Fields the edit UI exposes. A POST naming any other field is turned
/// away before validators run.
pub const EDITABLE_FIELDS: &[&str] = &[FIELD_RATING, FIELD_COMMENTS];

pub const COMMENTS_MAX_LEN: usize = 1200;
pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 254;

/// The shared feedback journey instance, built once.
pub fn feedback_journey() -> &'static Journey {
    static JOURNEY: OnceLock<Journey> = OnceLock::new();
    JOURNEY.get_or_init(build_journey)
}

fn build_journey() -> Journey {
    Journey {
        id: JOURNEY_ID.to_string(),
        title: "Give feedback".to_string(),
        sections: vec![
            Section {
                name: "experience".to_string(),
                url_segment: "experience".to_string(),
                condition: None,
                questions: vec![
                    QuestionDefinition {
                        field_name: FIELD_RATING.to_string(),
                        url_segment: "rating".to_string(),
                        title: "Overall, how satisfied were you with this service?".to_string(),
                        hint: None,
                        display_type: DisplayType::Radio,
                        rules: vec![
                            Rule::required("Select how satisfied you were"),
                            Rule::one_of("Select a rating from the list"),
                        ],
                        options: vec![
                            QuestionOption::new("1", "Very dissatisfied"),
                            QuestionOption::new("2", "Dissatisfied"),
                            QuestionOption::new("3", "Neither satisfied nor dissatisfied"),
                            QuestionOption::new("4", "Satisfied"),
                            QuestionOption::new("5", "Very satisfied"),
                        ],
                        group_fields: vec![],
                        condition: None,
                    },
                    QuestionDefinition {
                        field_name: FIELD_COMMENTS.to_string(),
                        url_segment: "comments".to_string(),
                        title: "How could we improve this service?".to_string(),
                        hint: Some(
                            "Do not include personal or financial information".to_string(),
                        ),
                        display_type: DisplayType::Textarea,
                        rules: vec![Rule::max_length(
                            COMMENTS_MAX_LEN,
                            "Comments must be 1,200 characters or fewer",
                        )],
                        options: vec![],
                        group_fields: vec![],
                        condition: None,
                    },
                ],
            },
            Section {
                name: "contact".to_string(),
                url_segment: "contact".to_string(),
                condition: None,
                questions: vec![QuestionDefinition {
                    field_name: FIELD_WANTS_CONTACT.to_string(),
                    url_segment: "can-we-contact-you".to_string(),
                    title: "May we contact you about your feedback?".to_string(),
                    hint: None,
                    display_type: DisplayType::Boolean,
                    rules: vec![Rule::required("Select yes or no")],
                    options: vec![],
                    group_fields: vec![],
                    condition: None,
                }],
            },
            Section {
                name: "contact-details".to_string(),
                url_segment: "contact-details".to_string(),
                condition: Some(Condition::IsTrue {
                    field: FIELD_WANTS_CONTACT.to_string(),
                }),
                questions: vec![
                    QuestionDefinition {
                        field_name: FIELD_NAME.to_string(),
                        url_segment: "name".to_string(),
                        title: "What is your name?".to_string(),
                        hint: None,
                        display_type: DisplayType::Text,
                        rules: vec![
                            Rule::required("Enter your name"),
                            Rule::max_length(
                                NAME_MAX_LEN,
                                "Name must be 100 characters or fewer",
                            ),
                        ],
                        options: vec![],
                        group_fields: vec![],
                        condition: None,
                    },
                    QuestionDefinition {
                        field_name: FIELD_EMAIL.to_string(),
                        url_segment: "email".to_string(),
                        title: "What is your email address?".to_string(),
                        hint: Some(
                            "We will only use this to reply to your feedback".to_string(),
                        ),
                        display_type: DisplayType::Text,
                        rules: vec![
                            Rule::required("Enter your email address"),
                            Rule::max_length(
                                EMAIL_MAX_LEN,
                                "Email address must be 254 characters or fewer",
                            ),
                            Rule::email("Enter an email address in the correct format"),
                        ],
                        options: vec![],
                        group_fields: vec![],
                        condition: None,
                    },
                ],
            },
        ],
    }
}
