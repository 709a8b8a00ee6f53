//! Blog comment model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meridian_core::types::{DbId, Timestamp};

/// A row from the `comments` table. New comments always land as
/// `pending`; only `approved` ones are served publicly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub author_name: String,
    pub author_email: Option<String>,
    pub body: String,
    pub status: String,
    pub guest_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a reader-submitted comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub author_name: String,
    pub author_email: Option<String>,
    pub body: String,
    pub guest_id: Option<String>,
}
