//! Repository for the `user_sessions` table.
//!
//! Sessions are write-mostly: created on login, looked up exactly once on
//! refresh, then revoked. [`SessionRepo::purge_stale`] is the only bulk
//! operation, run by the background maintenance task.

use sqlx::PgPool;

use meridian_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, user_id, refresh_token_digest, expires_at, is_revoked, \
                        created_at, updated_at";

pub struct SessionRepo;

impl SessionRepo {
    /// Persist a new session row for a freshly minted refresh token.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_digest, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_digest)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Look up the live session for a token digest. Revoked and expired
    /// rows are invisible here, so a replayed token simply misses.
    pub async fn find_live_by_digest(
        pool: &PgPool,
        digest: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_digest = $1 AND NOT is_revoked AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(digest)
            .fetch_optional(pool)
            .await
    }

    /// Revoke one session. Returns whether a live row was actually revoked.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let done = sqlx::query("UPDATE user_sessions SET is_revoked = TRUE WHERE id = $1 AND NOT is_revoked")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    /// Revoke every live session a user holds (logout-everywhere).
    /// Returns how many sessions were ended.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let done = sqlx::query(
            "UPDATE user_sessions SET is_revoked = TRUE WHERE user_id = $1 AND NOT is_revoked",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(done.rows_affected())
    }

    /// Drop rows that can never be used again: expired or already revoked.
    /// Returns the number of rows removed.
    pub async fn purge_stale(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let done = sqlx::query("DELETE FROM user_sessions WHERE is_revoked OR expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(done.rows_affected())
    }
}
