//! One-shot outcome messages carried across a post-commit redirect.

use serde::{Deserialize, Serialize};

/// The outcome of a commit, stored in the session and read exactly
/// once by the page the user is redirected to. Readers must clear it
/// on read or a stale banner reappears on unrelated page loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Flash {
    /// A journey was committed as a new submission.
    Submitted { reference: String },
    /// A single field of an existing submission was updated.
    Updated { reference: String },
    /// A submission was soft-deleted.
    Deleted { reference: String },
    /// An action failed; `message` is already user-safe.
    Error { message: String },
}

impl Flash {
    pub fn submitted(reference: impl Into<String>) -> Self {
        Self::Submitted {
            reference: reference.into(),
        }
    }

    pub fn updated(reference: impl Into<String>) -> Self {
        Self::Updated {
            reference: reference.into(),
        }
    }

    pub fn deleted(reference: impl Into<String>) -> Self {
        Self::Deleted {
            reference: reference.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
