//! Repository for the `form_sessions` table.
//!
//! Sessions are keyed by the opaque cookie value. Each session's JSONB
//! `data` column holds independent namespaces: one per journey id for
//! in-progress answers, plus the flash namespace. Writes are
//! last-write-wins per namespace -- two tabs racing on the same journey
//! id silently clobber each other, which is accepted behaviour, not
//! something this layer defends against.

use sqlx::PgPool;

use crate::models::form_session::FormSession;

/// Provides session envelope storage keyed by cookie value.
pub struct FormSessionRepo;

impl FormSessionRepo {
    /// Find a session row by its cookie key.
    pub async fn find_by_key(
        pool: &PgPool,
        session_key: &str,
    ) -> Result<Option<FormSession>, sqlx::Error> {
        sqlx::query_as::<_, FormSession>(
            "SELECT id, session_key, data, created_at, updated_at
             FROM form_sessions WHERE session_key = $1",
        )
        .bind(session_key)
        .fetch_optional(pool)
        .await
    }

    /// Read one namespace from a session, `None` when the session or
    /// the namespace does not exist.
    pub async fn get_namespace(
        pool: &PgPool,
        session_key: &str,
        namespace: &str,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        let value: Option<Option<serde_json::Value>> = sqlx::query_scalar(
            "SELECT data -> $2 FROM form_sessions WHERE session_key = $1",
        )
        .bind(session_key)
        .bind(namespace)
        .fetch_optional(pool)
        .await?;
        Ok(value.flatten())
    }

    /// Write one namespace, creating the session row if needed.
    pub async fn set_namespace(
        pool: &PgPool,
        session_key: &str,
        namespace: &str,
        value: &serde_json::Value,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO form_sessions (session_key, data)
             VALUES ($1, jsonb_build_object($2::text, $3::jsonb))
             ON CONFLICT (session_key) DO UPDATE
             SET data = jsonb_set(form_sessions.data, ARRAY[$2], $3::jsonb, true),
                 updated_at = NOW()",
        )
        .bind(session_key)
        .bind(namespace)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Remove one namespace from a session. A missing session or
    /// namespace is a no-op.
    pub async fn clear_namespace(
        pool: &PgPool,
        session_key: &str,
        namespace: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE form_sessions SET data = data - $2, updated_at = NOW()
             WHERE session_key = $1",
        )
        .bind(session_key)
        .bind(namespace)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Read a namespace and clear it in the same transaction (the
    /// one-shot flash read).
    pub async fn take_namespace(
        pool: &PgPool,
        session_key: &str,
        namespace: &str,
    ) -> Result<Option<serde_json::Value>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let value: Option<Option<serde_json::Value>> = sqlx::query_scalar(
            "SELECT data -> $2 FROM form_sessions WHERE session_key = $1 FOR UPDATE",
        )
        .bind(session_key)
        .bind(namespace)
        .fetch_optional(&mut *tx)
        .await?;
        let value = value.flatten();

        if value.is_some() {
            sqlx::query(
                "UPDATE form_sessions SET data = data - $2, updated_at = NOW()
                 WHERE session_key = $1",
            )
            .bind(session_key)
            .bind(namespace)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(value)
    }

    /// Delete sessions idle for longer than `max_idle_days`. Returns
    /// the count of deleted rows.
    pub async fn delete_idle(pool: &PgPool, max_idle_days: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM form_sessions
             WHERE updated_at < NOW() - make_interval(days => $1)",
        )
        .bind(max_idle_days)
        .execute(pool)
        .await?;
        tracing::debug!(deleted = result.rows_affected(), "Pruned idle form sessions");
        Ok(result.rows_affected())
    }
}
