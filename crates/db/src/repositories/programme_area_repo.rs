//! Repository for the `programme_areas` table.

use sqlx::PgPool;

use meridian_core::types::DbId;

use crate::models::programme::{CreateProgrammeArea, ProgrammeArea, UpdateProgrammeArea};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, title, slug, summary, description, hero_image_url, \
                        sort_order, is_published, created_at, updated_at";

/// Provides CRUD operations for programme areas.
pub struct ProgrammeAreaRepo;

impl ProgrammeAreaRepo {
    /// Insert a new programme area, returning the created row.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreateProgrammeArea,
    ) -> Result<ProgrammeArea, sqlx::Error> {
        let query = format!(
            "INSERT INTO programme_areas
                 (title, slug, summary, description, hero_image_url, sort_order, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgrammeArea>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.hero_image_url)
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.is_published.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Find a programme area by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProgrammeArea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programme_areas WHERE id = $1");
        sqlx::query_as::<_, ProgrammeArea>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a programme area by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<ProgrammeArea>, sqlx::Error> {
        let published_clause = if published_only {
            " AND is_published = true"
        } else {
            ""
        };
        let query =
            format!("SELECT {COLUMNS} FROM programme_areas WHERE slug = $1{published_clause}");
        sqlx::query_as::<_, ProgrammeArea>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List programme areas in display order.
    pub async fn list(
        pool: &PgPool,
        published_only: bool,
    ) -> Result<Vec<ProgrammeArea>, sqlx::Error> {
        let published_clause = if published_only {
            " WHERE is_published = true"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM programme_areas{published_clause} ORDER BY sort_order, title"
        );
        sqlx::query_as::<_, ProgrammeArea>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a programme area. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgrammeArea,
    ) -> Result<Option<ProgrammeArea>, sqlx::Error> {
        let query = format!(
            "UPDATE programme_areas SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                summary = COALESCE($4, summary),
                description = COALESCE($5, description),
                hero_image_url = COALESCE($6, hero_image_url),
                sort_order = COALESCE($7, sort_order),
                is_published = COALESCE($8, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgrammeArea>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.hero_image_url)
            .bind(input.sort_order)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a programme area. Cascade deletes its programmes.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programme_areas WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
