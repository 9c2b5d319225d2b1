//! Repository for the `submissions` table.

use intake_core::types::DbId;
use sqlx::PgPool;

use crate::models::submission::{CreateSubmission, Submission, SubmissionUpdate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, reference, rating, comments, name, email, deleted_at, created_at, updated_at";

/// Provides CRUD operations for submissions.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a new submission, returning the created row.
    ///
    /// The reference is generated by the caller; a collision surfaces
    /// as a unique-constraint error on `uq_submissions_reference`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSubmission,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (reference, rating, comments, name, email)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(&input.reference)
            .bind(input.rating)
            .bind(&input.comments)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    /// Find a submission by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM submissions WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a submission by ID, including soft-deleted rows (audit).
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active submissions newest-first together with the total
    /// count, from one transaction so the two agree when rendered
    /// side by side.
    pub async fn list_with_count(
        pool: &PgPool,
    ) -> Result<(Vec<Submission>, i64), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "SELECT {COLUMNS} FROM submissions
             WHERE deleted_at IS NULL
             ORDER BY created_at DESC"
        );
        let items = sqlx::query_as::<_, Submission>(&query)
            .fetch_all(&mut *tx)
            .await?;

        let total_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE deleted_at IS NULL")
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok((items, total_count))
    }

    /// Count active submissions.
    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM submissions WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await
    }

    /// Apply a single-column update and stamp `updated_at`.
    ///
    /// Returns `None` if the row is absent or soft-deleted. No other
    /// column is ever touched in the same statement.
    pub async fn update_field(
        pool: &PgPool,
        id: DbId,
        update: &SubmissionUpdate,
    ) -> Result<Option<Submission>, sqlx::Error> {
        match update {
            SubmissionUpdate::Rating(rating) => {
                let query = format!(
                    "UPDATE submissions SET rating = $2, updated_at = NOW()
                     WHERE id = $1 AND deleted_at IS NULL
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Submission>(&query)
                    .bind(id)
                    .bind(rating)
                    .fetch_optional(pool)
                    .await
            }
            SubmissionUpdate::Comments(comments) => {
                let query = format!(
                    "UPDATE submissions SET comments = $2, updated_at = NOW()
                     WHERE id = $1 AND deleted_at IS NULL
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Submission>(&query)
                    .bind(id)
                    .bind(comments)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Soft-delete a submission by ID. Returns `true` if a row was
    /// marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE submissions SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
