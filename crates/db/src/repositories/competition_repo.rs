//! Repository for the `competitions` table.
//!
//! The application form document is saved on its own path
//! ([`CompetitionRepo::save_form`]) and always replaced wholesale.

use sqlx::PgPool;

use meridian_core::types::DbId;

use crate::models::competition::{Competition, CreateCompetition, UpdateCompetition};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, programme_id, title, slug, summary, description, \
                        hero_image_url, starts_at, ends_at, is_published, \
                        application_form, created_at, updated_at";

/// Provides CRUD operations for competitions and their form documents.
pub struct CompetitionRepo;

impl CompetitionRepo {
    /// Insert a new competition, returning the created row. The form
    /// document starts empty (disabled, no fields).
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreateCompetition,
    ) -> Result<Competition, sqlx::Error> {
        let query = format!(
            "INSERT INTO competitions
                 (programme_id, title, slug, summary, description, hero_image_url,
                  starts_at, ends_at, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Competition>(&query)
            .bind(input.programme_id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.hero_image_url)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.is_published.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Find a competition by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Competition>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM competitions WHERE id = $1");
        sqlx::query_as::<_, Competition>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a competition by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Competition>, sqlx::Error> {
        let published_clause = if published_only {
            " AND is_published = true"
        } else {
            ""
        };
        let query = format!("SELECT {COLUMNS} FROM competitions WHERE slug = $1{published_clause}");
        sqlx::query_as::<_, Competition>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List competitions, newest first.
    pub async fn list(pool: &PgPool, published_only: bool) -> Result<Vec<Competition>, sqlx::Error> {
        let published_clause = if published_only {
            " WHERE is_published = true"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM competitions{published_clause} ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Competition>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a competition's metadata. The form document is untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompetition,
    ) -> Result<Option<Competition>, sqlx::Error> {
        let query = format!(
            "UPDATE competitions SET
                programme_id = COALESCE($2, programme_id),
                title = COALESCE($3, title),
                slug = COALESCE($4, slug),
                summary = COALESCE($5, summary),
                description = COALESCE($6, description),
                hero_image_url = COALESCE($7, hero_image_url),
                starts_at = COALESCE($8, starts_at),
                ends_at = COALESCE($9, ends_at),
                is_published = COALESCE($10, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Competition>(&query)
            .bind(id)
            .bind(input.programme_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.hero_image_url)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Replace the form document wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn save_form(
        pool: &PgPool,
        id: DbId,
        form: &serde_json::Value,
    ) -> Result<Option<Competition>, sqlx::Error> {
        let query = format!(
            "UPDATE competitions SET application_form = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Competition>(&query)
            .bind(id)
            .bind(form)
            .fetch_optional(pool)
            .await
    }

    /// Delete a competition. Cascade deletes its applications.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
