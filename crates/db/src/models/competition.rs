//! Competition model and DTOs.
//!
//! The application form lives on the competition row as one JSONB
//! document, replaced wholesale on each save.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meridian_core::form::ApplicationFormConfig;
use meridian_core::types::{DbId, Timestamp};

/// A row from the `competitions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Competition {
    pub id: DbId,
    pub programme_id: Option<DbId>,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_published: bool,
    pub application_form: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Competition {
    /// Parse the stored form document. An empty `{}` document yields the
    /// default (disabled, no fields) config via serde defaults.
    pub fn form_config(&self) -> Result<ApplicationFormConfig, serde_json::Error> {
        serde_json::from_value(self.application_form.clone())
    }
}

/// DTO for creating a competition.
#[derive(Debug, Deserialize)]
pub struct CreateCompetition {
    pub programme_id: Option<DbId>,
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_published: Option<bool>,
}

/// DTO for updating a competition. All fields are optional; the form
/// document has its own save path and is not patched here.
#[derive(Debug, Deserialize)]
pub struct UpdateCompetition {
    pub programme_id: Option<DbId>,
    pub title: Option<String>,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub hero_image_url: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_published: Option<bool>,
}
