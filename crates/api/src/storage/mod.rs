//! Object storage for admin uploads.
//!
//! The [`ObjectStore`] trait abstracts where uploaded files live; the
//! backend is chosen at startup from [`StorageConfig`]. Handlers only see
//! public URLs.
//!
//! [`StorageConfig`]: crate::config::StorageConfig

pub mod local;
pub mod s3;

pub use local::LocalStore;
pub use s3::S3Store;

use async_trait::async_trait;

/// Errors from object storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 error: {0}")]
    S3(String),

    #[error("Invalid object name: {0}")]
    InvalidName(String),
}

/// Metadata for one stored object, as listed by a backend.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredObject {
    pub name: String,
    pub url: String,
    pub size_bytes: i64,
}

/// Storage backend for uploaded files.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `name`, returning the public URL.
    async fn put(
        &self,
        name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, StorageError>;

    /// List all stored objects.
    async fn list(&self) -> Result<Vec<StoredObject>, StorageError>;

    /// Delete an object. Returns `false` when it did not exist.
    async fn delete(&self, name: &str) -> Result<bool, StorageError>;

    /// The public URL an object is (or would be) served from.
    fn url_for(&self, name: &str) -> String;
}

/// Reject traversal sequences and separators in object names.
///
/// Uploaded names pass through URL paths and the local filesystem, so only
/// a conservative character set is accepted.
pub fn validate_object_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::InvalidName("name must not be empty".into()));
    }
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(StorageError::InvalidName(format!(
            "'{name}' must not contain path separators"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(StorageError::InvalidName(format!(
            "'{name}' may only contain alphanumerics, '-', '_' and '.'"
        )));
    }
    Ok(())
}

/// Replace anything outside the safe object-name character set, keeping
/// the extension readable. Used when deriving a stored name from a client
/// filename.
pub fn sanitize_file_name(original: &str) -> String {
    let cleaned: String = original
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names_accepted() {
        assert!(validate_object_name("logo.png").is_ok());
        assert!(validate_object_name("2025-annual_report.pdf").is_ok());
    }

    #[test]
    fn test_traversal_rejected() {
        assert!(validate_object_name("../etc/passwd").is_err());
        assert!(validate_object_name("a/b.png").is_err());
        assert!(validate_object_name("a\\b.png").is_err());
        assert!(validate_object_name("").is_err());
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_file_name("my photo (1).png"), "my_photo__1_.png");
        assert_eq!(sanitize_file_name("..."), "file");
        assert!(validate_object_name(&sanitize_file_name("weird/../name.jpg")).is_ok());
    }
}
