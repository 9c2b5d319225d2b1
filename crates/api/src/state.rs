use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notifications::Notifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: intake_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Submission notification sink (SMTP or log-only).
    pub notifier: Arc<dyn Notifier>,
}
