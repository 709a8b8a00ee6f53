//! Uploaded media asset model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use meridian_core::types::{DbId, Timestamp};

/// A row from the `media_assets` table, keyed by stored object name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaAsset {
    pub id: DbId,
    pub file_name: String,
    pub original_name: String,
    pub content_type: String,
    pub byte_size: i64,
    pub public_url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for recording a stored upload.
#[derive(Debug)]
pub struct CreateMediaAsset {
    pub file_name: String,
    pub original_name: String,
    pub content_type: String,
    pub byte_size: i64,
    pub public_url: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub uploaded_by: Option<DbId>,
}
