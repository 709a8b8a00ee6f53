//! Repository for the `media_assets` table.

use sqlx::PgPool;

use crate::models::media::{CreateMediaAsset, MediaAsset};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, file_name, original_name, content_type, byte_size, \
                        public_url, width, height, uploaded_by, created_at";

/// Default page size for the asset listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for the asset listing.
const MAX_LIMIT: i64 = 200;

/// Provides CRUD operations for uploaded media assets.
pub struct MediaRepo;

impl MediaRepo {
    /// Record a stored upload, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMediaAsset) -> Result<MediaAsset, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_assets
                 (file_name, original_name, content_type, byte_size, public_url,
                  width, height, uploaded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(&input.file_name)
            .bind(&input.original_name)
            .bind(&input.content_type)
            .bind(input.byte_size)
            .bind(&input.public_url)
            .bind(input.width)
            .bind(input.height)
            .bind(input.uploaded_by)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by its stored object name.
    pub async fn find_by_file_name(
        pool: &PgPool,
        file_name: &str,
    ) -> Result<Option<MediaAsset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_assets WHERE file_name = $1");
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(file_name)
            .fetch_optional(pool)
            .await
    }

    /// List assets newest-first.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = offset.unwrap_or(0);
        let query = format!(
            "SELECT {COLUMNS} FROM media_assets
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Delete the record for a stored object name.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_by_file_name(pool: &PgPool, file_name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM media_assets WHERE file_name = $1")
            .bind(file_name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
