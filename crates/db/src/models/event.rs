//! Event model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meridian_core::types::{DbId, Timestamp};

/// One calendar entry from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub hero_image_url: Option<String>,
    pub registration_url: Option<String>,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Option<Timestamp>,
    pub hero_image_url: Option<String>,
    pub registration_url: Option<String>,
    pub is_published: Option<bool>,
}

/// DTO for updating an event. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub hero_image_url: Option<String>,
    pub registration_url: Option<String>,
    pub is_published: Option<bool>,
}
