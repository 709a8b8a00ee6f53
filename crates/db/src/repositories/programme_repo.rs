//! Repository for the `programmes` table.

use sqlx::PgPool;

use meridian_core::types::DbId;

use crate::models::programme::{CreateProgramme, Programme, UpdateProgramme};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, area_id, title, slug, summary, body, hero_image_url, \
                        sort_order, is_published, created_at, updated_at";

/// Provides CRUD operations for programmes.
pub struct ProgrammeRepo;

impl ProgrammeRepo {
    /// Insert a new programme, returning the created row.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreateProgramme,
    ) -> Result<Programme, sqlx::Error> {
        let query = format!(
            "INSERT INTO programmes
                 (area_id, title, slug, summary, body, hero_image_url, sort_order, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Programme>(&query)
            .bind(input.area_id)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.hero_image_url)
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.is_published.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Find a programme by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Programme>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM programmes WHERE id = $1");
        sqlx::query_as::<_, Programme>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a programme by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Programme>, sqlx::Error> {
        let published_clause = if published_only {
            " AND is_published = true"
        } else {
            ""
        };
        let query = format!("SELECT {COLUMNS} FROM programmes WHERE slug = $1{published_clause}");
        sqlx::query_as::<_, Programme>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List programmes, optionally restricted to one area, in display order.
    pub async fn list(
        pool: &PgPool,
        area_id: Option<DbId>,
        published_only: bool,
    ) -> Result<Vec<Programme>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        if area_id.is_some() {
            conditions.push("area_id = $1".to_string());
        }
        if published_only {
            conditions.push("is_published = true".to_string());
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query =
            format!("SELECT {COLUMNS} FROM programmes {where_clause} ORDER BY sort_order, title");

        let mut q = sqlx::query_as::<_, Programme>(&query);
        if let Some(area) = area_id {
            q = q.bind(area);
        }
        q.fetch_all(pool).await
    }

    /// Update a programme. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProgramme,
    ) -> Result<Option<Programme>, sqlx::Error> {
        let query = format!(
            "UPDATE programmes SET
                area_id = COALESCE($2, area_id),
                title = COALESCE($3, title),
                slug = COALESCE($4, slug),
                summary = COALESCE($5, summary),
                body = COALESCE($6, body),
                hero_image_url = COALESCE($7, hero_image_url),
                sort_order = COALESCE($8, sort_order),
                is_published = COALESCE($9, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Programme>(&query)
            .bind(id)
            .bind(input.area_id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.body)
            .bind(&input.hero_image_url)
            .bind(input.sort_order)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a programme. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM programmes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
