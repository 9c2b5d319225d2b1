//! Cookie-backed session context.
//!
//! [`session_layer`] guarantees every `/api/v1` request carries a
//! session key: it reads the session cookie, minting a new key and
//! appending `Set-Cookie` when absent. [`SessionContext`] is the
//! explicit per-request handle handlers use to reach the session
//! envelope -- answers per journey plus the one-shot flash. There is no
//! hidden global; everything flows through this context.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::{Cookie, SameSite};
use uuid::Uuid;

use intake_core::answers::{AnswerValue, Answers};
use intake_core::flash::Flash;
use intake_db::repositories::FormSessionRepo;
use intake_db::DbPool;

use crate::error::AppError;
use crate::state::AppState;

/// Session data namespace for the one-shot flash outcome.
const FLASH_NAMESPACE: &str = "flash";

/// The session key carried through request extensions.
#[derive(Debug, Clone)]
pub struct SessionKey(pub String);

/// Middleware: ensure a session cookie exists and expose its key.
///
/// The session row itself is created lazily on first write, so purely
/// read-only traffic does not grow the `form_sessions` table.
pub async fn session_layer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.session_cookie.as_str();

    let existing = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|header| {
            Cookie::split_parse(header.to_owned())
                .filter_map(Result::ok)
                .find(|c| c.name() == cookie_name)
                .map(|c| c.value().to_string())
        });

    let (key, is_new) = match existing {
        Some(key) => (key, false),
        None => (Uuid::new_v4().to_string(), true),
    };

    request.extensions_mut().insert(SessionKey(key.clone()));
    let mut response = next.run(request).await;

    if is_new {
        let cookie = Cookie::build((cookie_name.to_owned(), key))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        if let Ok(value) = cookie.to_string().parse() {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Per-request handle to the session envelope.
pub struct SessionContext {
    key: String,
    pool: DbPool,
}

impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .extensions
            .get::<SessionKey>()
            .cloned()
            .ok_or_else(|| {
                AppError::Internal("session middleware is not installed on this route".into())
            })?;
        Ok(Self {
            key: key.0,
            pool: state.pool.clone(),
        })
    }
}

impl SessionContext {
    /// The in-progress answers for a journey; empty when none stored.
    ///
    /// Undecodable stored data is treated as a fresh start rather than
    /// an error -- the respondent re-enters answers instead of being
    /// locked out of the journey.
    pub async fn answers(&self, journey_id: &str) -> Result<Answers, AppError> {
        match FormSessionRepo::get_namespace(&self.pool, &self.key, journey_id).await? {
            Some(value) => Ok(serde_json::from_value(value).unwrap_or_else(|err| {
                tracing::warn!(
                    journey_id,
                    error = %err,
                    "Discarding undecodable session answers"
                );
                Answers::new()
            })),
            None => Ok(Answers::new()),
        }
    }

    /// Merge-write one answered field, returning the updated answers.
    pub async fn put_answer(
        &self,
        journey_id: &str,
        field: &str,
        value: AnswerValue,
    ) -> Result<Answers, AppError> {
        let mut answers = self.answers(journey_id).await?;
        answers.insert(field, value);
        let json = serde_json::to_value(&answers)
            .map_err(|err| AppError::Internal(format!("answers serialization failed: {err}")))?;
        FormSessionRepo::set_namespace(&self.pool, &self.key, journey_id, &json).await?;
        Ok(answers)
    }

    /// Drop all answers for a journey (after a successful commit).
    pub async fn clear_answers(&self, journey_id: &str) -> Result<(), AppError> {
        FormSessionRepo::clear_namespace(&self.pool, &self.key, journey_id).await?;
        Ok(())
    }

    /// Store a one-shot outcome, replacing any unread one.
    pub async fn set_flash(&self, flash: &Flash) -> Result<(), AppError> {
        let json = serde_json::to_value(flash)
            .map_err(|err| AppError::Internal(format!("flash serialization failed: {err}")))?;
        FormSessionRepo::set_namespace(&self.pool, &self.key, FLASH_NAMESPACE, &json).await?;
        Ok(())
    }

    /// Read and clear the one-shot outcome in a single step.
    pub async fn take_flash(&self) -> Result<Option<Flash>, AppError> {
        match FormSessionRepo::take_namespace(&self.pool, &self.key, FLASH_NAMESPACE).await? {
            Some(value) => Ok(serde_json::from_value(value)
                .map_err(|err| {
                    tracing::warn!(error = %err, "Discarding undecodable flash");
                })
                .ok()),
            None => Ok(None),
        }
    }
}
