//! Programme area and programme models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meridian_core::types::{DbId, Timestamp};

/// A row from the `programme_areas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgrammeArea {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `programmes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Programme {
    pub id: DbId,
    pub area_id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a programme area. `slug` falls back to one generated
/// from the title when absent.
#[derive(Debug, Deserialize)]
pub struct CreateProgrammeArea {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

/// DTO for updating a programme area. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProgrammeArea {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

/// DTO for creating a programme under an area.
#[derive(Debug, Deserialize)]
pub struct CreateProgramme {
    pub area_id: DbId,
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}

/// DTO for updating a programme. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProgramme {
    pub area_id: Option<DbId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub hero_image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_published: Option<bool>,
}
