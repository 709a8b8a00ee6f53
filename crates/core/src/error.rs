use crate::types::DbId;

/// Domain-level error shared by every layer above `core`.
///
/// Entities are addressed by numeric id internally and by slug on public
/// routes, so [`CoreError::NotFound`] carries the lookup key as a string.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Not-found for an entity addressed by numeric id.
    pub fn not_found_id(entity: &'static str, id: DbId) -> Self {
        CoreError::NotFound {
            entity,
            key: id.to_string(),
        }
    }

    /// Not-found for an entity addressed by slug.
    pub fn not_found_slug(entity: &'static str, slug: &str) -> Self {
        CoreError::NotFound {
            entity,
            key: slug.to_string(),
        }
    }
}
