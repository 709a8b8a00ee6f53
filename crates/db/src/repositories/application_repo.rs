//! Repository for the `applications` table.

use sqlx::PgPool;

use meridian_core::status::SUBMISSION_PENDING;
use meridian_core::types::DbId;

use crate::models::application::{Application, CreateApplication};

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, competition_id, applicant_name, applicant_email, \
                        applicant_phone, form_data, status, notes, created_at, updated_at";

/// Default page size for submission listing.
const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for submission listing.
const MAX_LIMIT: i64 = 200;

/// Provides CRUD operations for competition applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Store a validated submission, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications
                 (competition_id, applicant_name, applicant_email, applicant_phone,
                  form_data, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(input.competition_id)
            .bind(&input.applicant_name)
            .bind(&input.applicant_email)
            .bind(&input.applicant_phone)
            .bind(&input.form_data)
            .bind(SUBMISSION_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Find an application by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List applications for a competition, newest first, optionally
    /// filtered by review status.
    pub async fn list_for_competition(
        pool: &PgPool,
        competition_id: DbId,
        status: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = offset.unwrap_or(0);

        match status {
            Some(_) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM applications
                     WHERE competition_id = $1 AND status = $2
                     ORDER BY created_at DESC
                     LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, Application>(&query)
                    .bind(competition_id)
                    .bind(status)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM applications
                     WHERE competition_id = $1
                     ORDER BY created_at DESC
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, Application>(&query)
                    .bind(competition_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count applications for a competition.
    pub async fn count_for_competition(
        pool: &PgPool,
        competition_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM applications WHERE competition_id = $1",
        )
        .bind(competition_id)
        .fetch_one(pool)
        .await
    }

    /// Apply the admin review update. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_review(
        pool: &PgPool,
        id: DbId,
        status: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                status = COALESCE($2, status),
                notes = COALESCE($3, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }
}
