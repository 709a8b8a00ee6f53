//! Competition application (submission) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meridian_core::types::{DbId, Timestamp};

/// A row from the `applications` table. `form_data` maps field id to the
/// submitted answer (string, bool, or uploaded-file URL string).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub competition_id: DbId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub form_data: serde_json::Value,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for storing a validated submission.
#[derive(Debug)]
pub struct CreateApplication {
    pub competition_id: DbId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub applicant_phone: String,
    pub form_data: serde_json::Value,
}

/// DTO for the admin review update (status and/or notes).
#[derive(Debug, Deserialize)]
pub struct UpdateApplicationReview {
    pub application_id: DbId,
    pub status: Option<String>,
    pub notes: Option<String>,
}
