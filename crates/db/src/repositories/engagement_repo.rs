//! Repository for the engagement counters: `blog_posts.view_count`,
//! `blog_likes`, and `blog_view_marks`.
//!
//! The unique constraint `uq_blog_likes_post_guest` is what holds the
//! one-like-per-guest invariant; the code never counts likes any other
//! way than from the rows.

use sqlx::PgPool;

use meridian_core::types::DbId;

use crate::models::engagement::LikeState;

/// Provides counter reads and guest-scoped mutations.
pub struct EngagementRepo;

impl EngagementRepo {
    /// Current authoritative view count of a post.
    pub async fn view_count(pool: &PgPool, post_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT view_count FROM blog_posts WHERE id = $1")
            .bind(post_id)
            .fetch_one(pool)
            .await
    }

    /// Record one view and return the authoritative count afterwards.
    ///
    /// When a guest id is given and the dedup window is non-zero, a
    /// `blog_view_marks` row gates the increment: repeat views by the
    /// same guest inside `dedup_window_secs` of the last counted view do
    /// not increment. Views without a guest id always count.
    pub async fn record_view(
        pool: &PgPool,
        post_id: DbId,
        guest_id: Option<&str>,
        dedup_window_secs: i64,
    ) -> Result<i64, sqlx::Error> {
        let counted = match guest_id {
            Some(guest) if dedup_window_secs > 0 => {
                // The mark is only refreshed when the previous counted
                // view is outside the window, so suppressed views do not
                // extend it.
                let marked = sqlx::query_scalar::<_, DbId>(
                    "INSERT INTO blog_view_marks (post_id, guest_id)
                     VALUES ($1, $2)
                     ON CONFLICT (post_id, guest_id) DO UPDATE
                         SET last_viewed_at = NOW()
                         WHERE blog_view_marks.last_viewed_at <= NOW() - make_interval(secs => $3)
                     RETURNING id",
                )
                .bind(post_id)
                .bind(guest)
                .bind(dedup_window_secs as f64)
                .fetch_optional(pool)
                .await?;
                marked.is_some()
            }
            _ => true,
        };

        if counted {
            sqlx::query_scalar::<_, i64>(
                "UPDATE blog_posts SET view_count = view_count + 1
                 WHERE id = $1
                 RETURNING view_count",
            )
            .bind(post_id)
            .fetch_one(pool)
            .await
        } else {
            Self::view_count(pool, post_id).await
        }
    }

    /// Toggle the guest's like on a post and return the resulting state.
    ///
    /// One like unit per (post, guest): liking twice returns to the
    /// original state.
    pub async fn toggle_like(
        pool: &PgPool,
        post_id: DbId,
        guest_id: &str,
    ) -> Result<LikeState, sqlx::Error> {
        let deleted = sqlx::query("DELETE FROM blog_likes WHERE post_id = $1 AND guest_id = $2")
            .bind(post_id)
            .bind(guest_id)
            .execute(pool)
            .await?
            .rows_affected()
            > 0;

        if !deleted {
            sqlx::query(
                "INSERT INTO blog_likes (post_id, guest_id) VALUES ($1, $2)
                 ON CONFLICT (post_id, guest_id) DO NOTHING",
            )
            .bind(post_id)
            .bind(guest_id)
            .execute(pool)
            .await?;
        }

        Self::like_state(pool, post_id, Some(guest_id)).await
    }

    /// Like count of a post and whether the given guest currently likes it.
    pub async fn like_state(
        pool: &PgPool,
        post_id: DbId,
        guest_id: Option<&str>,
    ) -> Result<LikeState, sqlx::Error> {
        let likes =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM blog_likes WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(pool)
                .await?;

        let is_liked = match guest_id {
            Some(guest) => {
                sqlx::query_scalar::<_, bool>(
                    "SELECT EXISTS(SELECT 1 FROM blog_likes WHERE post_id = $1 AND guest_id = $2)",
                )
                .bind(post_id)
                .bind(guest)
                .fetch_one(pool)
                .await?
            }
            None => false,
        };

        Ok(LikeState { likes, is_liked })
    }

    /// Delete view marks older than the given age. Returns the count of
    /// deleted rows.
    pub async fn prune_view_marks(pool: &PgPool, older_than_secs: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM blog_view_marks
             WHERE last_viewed_at < NOW() - make_interval(secs => $1)",
        )
        .bind(older_than_secs as f64)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
