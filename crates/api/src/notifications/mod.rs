//! Submission notification sink.
//!
//! The save flow notifies after a successful persist. Delivery is
//! best-effort: a failure is logged with full detail and swallowed, so
//! a saved submission is never reported back to the respondent as a
//! failure (which would invite a duplicate re-submit).

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use intake_db::models::submission::Submission;

use crate::config::ServerConfig;

/// Errors raised while building or sending a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("invalid notification address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build notification email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Fire-and-forget notification sink for committed submissions.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError>;
}

/// Fallback sink used when SMTP is not configured: records the
/// submission in the service log and succeeds.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        tracing::info!(
            submission_id = submission.id,
            reference = %submission.reference,
            "New submission recorded (no SMTP sink configured)"
        );
        Ok(())
    }
}

/// SMTP-backed sink that emails each committed submission.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl SmtpNotifier {
    pub fn new(smtp_url: &str, from: &str, to: &str) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::from_url(smtp_url)?.build();
        Ok(Self {
            transport,
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, submission: &Submission) -> Result<(), NotifyError> {
        let body = format!(
            "Reference: {}\nRating: {}\nComments: {}\nContact requested: {}\n",
            submission.reference,
            submission.rating,
            submission.comments.as_deref().unwrap_or("(not provided)"),
            if submission.email.is_some() || submission.name.is_some() {
                "yes"
            } else {
                "no"
            },
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(format!("New feedback submission {}", submission.reference))
            .body(body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// Build the configured notifier. Misconfigured SMTP settings fall
/// back to the log-only sink rather than refusing to start.
pub fn build_notifier(config: &ServerConfig) -> std::sync::Arc<dyn Notifier> {
    match (&config.smtp_url, &config.notify_from, &config.notify_to) {
        (Some(url), Some(from), Some(to)) => match SmtpNotifier::new(url, from, to) {
            Ok(notifier) => {
                tracing::info!("SMTP submission notifier configured");
                std::sync::Arc::new(notifier)
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    "Invalid SMTP notifier configuration, falling back to log-only"
                );
                std::sync::Arc::new(LogNotifier)
            }
        },
        _ => std::sync::Arc::new(LogNotifier),
    }
}
