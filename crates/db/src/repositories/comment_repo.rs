//! Repository for the `comments` table.

use sqlx::PgPool;

use meridian_core::status::{COMMENT_APPROVED, COMMENT_PENDING};
use meridian_core::types::DbId;

use crate::models::comment::{Comment, CreateComment};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, post_id, author_name, author_email, body, status, \
                        guest_id, created_at, updated_at";

/// Default page size for moderation listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for moderation listing.
const MAX_LIMIT: i64 = 200;

/// Provides CRUD and moderation operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Store a reader-submitted comment; it always lands as `pending`.
    pub async fn create(
        pool: &PgPool,
        post_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (post_id, author_name, author_email, body, status, guest_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .bind(&input.author_name)
            .bind(&input.author_email)
            .bind(&input.body)
            .bind(COMMENT_PENDING)
            .bind(&input.guest_id)
            .fetch_one(pool)
            .await
    }

    /// Find a comment by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the approved comments of a post, oldest first.
    pub async fn list_approved_for_post(
        pool: &PgPool,
        post_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE post_id = $1 AND status = $2
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(post_id)
            .bind(COMMENT_APPROVED)
            .fetch_all(pool)
            .await
    }

    /// List comments for moderation, newest first, optionally filtered
    /// by status.
    pub async fn list_for_moderation(
        pool: &PgPool,
        status: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = offset.unwrap_or(0);

        match status {
            Some(_) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM comments
                     WHERE status = $1
                     ORDER BY created_at DESC
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Comment>(&query)
                    .bind(status)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM comments
                     ORDER BY created_at DESC
                     LIMIT $1 OFFSET $2"
                );
                sqlx::query_as::<_, Comment>(&query)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Set a comment's moderation status.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("UPDATE comments SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a comment. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
