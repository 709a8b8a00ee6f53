//! Refresh-token session rows.

use sqlx::FromRow;

use meridian_core::types::{DbId, Timestamp};

/// One refresh token's lifecycle in `user_sessions`. The plaintext token
/// never touches the database; `refresh_token_digest` is its SHA-256 hex.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_digest: String,
    pub expires_at: Timestamp,
    /// Set once the token has been used or the user logged out; a revoked
    /// session never comes back.
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a new session.
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_digest: String,
    pub expires_at: Timestamp,
}
