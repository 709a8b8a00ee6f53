//! Repository for the `publications` table.

use sqlx::PgPool;

use meridian_core::types::DbId;

use crate::models::publication::{CreatePublication, Publication, UpdatePublication};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, title, slug, description, file_url, cover_image_url, \
                        published_on, is_published, created_at, updated_at";

/// Provides CRUD operations for publications.
pub struct PublicationRepo;

impl PublicationRepo {
    /// Insert a new publication, returning the created row.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreatePublication,
    ) -> Result<Publication, sqlx::Error> {
        let query = format!(
            "INSERT INTO publications
                 (title, slug, description, file_url, cover_image_url, published_on, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publication>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(&input.file_url)
            .bind(&input.cover_image_url)
            .bind(input.published_on)
            .bind(input.is_published.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Find a publication by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Publication>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publications WHERE id = $1");
        sqlx::query_as::<_, Publication>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a publication by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Publication>, sqlx::Error> {
        let published_clause = if published_only {
            " AND is_published = true"
        } else {
            ""
        };
        let query = format!("SELECT {COLUMNS} FROM publications WHERE slug = $1{published_clause}");
        sqlx::query_as::<_, Publication>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List publications, most recently dated first.
    pub async fn list(pool: &PgPool, published_only: bool) -> Result<Vec<Publication>, sqlx::Error> {
        let published_clause = if published_only {
            " WHERE is_published = true"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM publications{published_clause}
             ORDER BY published_on DESC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Publication>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a publication. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePublication,
    ) -> Result<Option<Publication>, sqlx::Error> {
        let query = format!(
            "UPDATE publications SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                file_url = COALESCE($5, file_url),
                cover_image_url = COALESCE($6, cover_image_url),
                published_on = COALESCE($7, published_on),
                is_published = COALESCE($8, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publication>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.file_url)
            .bind(&input.cover_image_url)
            .bind(input.published_on)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a publication. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM publications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
