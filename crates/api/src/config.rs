/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Name of the session cookie (default: `intake_session`).
    pub session_cookie: String,
    /// Sessions idle for longer than this are pruned (default: `30`).
    pub session_max_idle_days: i32,
    /// SMTP URL for the submission notifier; log-only when unset.
    pub smtp_url: Option<String>,
    /// Sender address for notification emails.
    pub notify_from: Option<String>,
    /// Recipient address for notification emails.
    pub notify_to: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `SESSION_COOKIE_NAME`    | `intake_session`           |
    /// | `SESSION_MAX_IDLE_DAYS`  | `30`                       |
    /// | `SMTP_URL`               | unset (log-only notifier)  |
    /// | `NOTIFY_FROM`            | unset                      |
    /// | `NOTIFY_TO`              | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_cookie =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "intake_session".into());

        let session_max_idle_days: i32 = std::env::var("SESSION_MAX_IDLE_DAYS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SESSION_MAX_IDLE_DAYS must be a valid i32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_cookie,
            session_max_idle_days,
            smtp_url: std::env::var("SMTP_URL").ok(),
            notify_from: std::env::var("NOTIFY_FROM").ok(),
            notify_to: std::env::var("NOTIFY_TO").ok(),
        }
    }
}
