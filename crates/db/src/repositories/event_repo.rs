//! Repository for the `events` table.

use sqlx::PgPool;

use meridian_core::types::DbId;

use crate::models::event::{CreateEvent, Event, UpdateEvent};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, title, slug, summary, description, location, starts_at, \
                        ends_at, hero_image_url, registration_url, is_published, \
                        created_at, updated_at";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, slug: &str, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                 (title, slug, summary, description, location, starts_at, ends_at,
                  hero_image_url, registration_url, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.hero_image_url)
            .bind(&input.registration_url)
            .bind(input.is_published.unwrap_or(false))
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<Event>, sqlx::Error> {
        let published_clause = if published_only {
            " AND is_published = true"
        } else {
            ""
        };
        let query = format!("SELECT {COLUMNS} FROM events WHERE slug = $1{published_clause}");
        sqlx::query_as::<_, Event>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List events soonest-first. `upcoming_only` drops events that have
    /// already started.
    pub async fn list(
        pool: &PgPool,
        published_only: bool,
        upcoming_only: bool,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let mut conditions: Vec<&str> = Vec::new();
        if published_only {
            conditions.push("is_published = true");
        }
        if upcoming_only {
            conditions.push("starts_at >= NOW()");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM events {where_clause} ORDER BY starts_at");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                summary = COALESCE($4, summary),
                description = COALESCE($5, description),
                location = COALESCE($6, location),
                starts_at = COALESCE($7, starts_at),
                ends_at = COALESCE($8, ends_at),
                hero_image_url = COALESCE($9, hero_image_url),
                registration_url = COALESCE($10, registration_url),
                is_published = COALESCE($11, is_published)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.summary)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.starts_at)
            .bind(input.ends_at)
            .bind(&input.hero_image_url)
            .bind(&input.registration_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
