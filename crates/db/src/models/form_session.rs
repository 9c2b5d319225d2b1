//! Session envelope model.

use intake_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `form_sessions` table.
///
/// `data` is a JSONB object mapping a journey id to its answers, plus
/// the `"flash"` namespace for one-shot outcome messages.
#[derive(Debug, Clone, FromRow)]
pub struct FormSession {
    pub id: DbId,
    pub session_key: String,
    pub data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
