//! Publication (downloadable report) model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meridian_core::types::{DbId, Timestamp};

/// A row from the `publications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Publication {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub file_url: String,
    pub cover_image_url: Option<String>,
    pub published_on: Option<NaiveDate>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a publication.
#[derive(Debug, Deserialize)]
pub struct CreatePublication {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub file_url: String,
    pub cover_image_url: Option<String>,
    pub published_on: Option<NaiveDate>,
    pub is_published: Option<bool>,
}

/// DTO for updating a publication. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdatePublication {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub published_on: Option<NaiveDate>,
    pub is_published: Option<bool>,
}
