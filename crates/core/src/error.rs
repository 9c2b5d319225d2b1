//! Domain error taxonomy shared across crates.

/// Domain-level error type.
///
/// Variants map onto distinct HTTP outcomes in `intake-api`; the
/// `Internal` message is logged there but never shown to end users.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup failed.
    #[error("{entity} '{id}' not found")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Input failed a domain validation rule.
    #[error("{0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("{0}")]
    Conflict(String),

    /// An invariant was broken; not user-correctable.
    #[error("{0}")]
    Internal(String),
}
