//! Local-filesystem storage backend.
//!
//! Files are written under a configured upload root and served back by the
//! router's `/uploads` static route. The public base is empty for
//! same-origin deployments and an absolute origin otherwise.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{validate_object_name, ObjectStore, StorageError, StoredObject};

pub struct LocalStore {
    root: PathBuf,
    public_base: String,
}

impl LocalStore {
    pub fn new(root: PathBuf, public_base: String) -> Self {
        Self { root, public_base }
    }

    /// The directory files are written to.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        name: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        validate_object_name(name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(name), bytes).await?;
        Ok(self.url_for(name))
    }

    async fn list(&self) -> Result<Vec<StoredObject>, StorageError> {
        let mut objects = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            // An upload root that does not exist yet simply has no objects.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(objects),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            objects.push(StoredObject {
                url: self.url_for(&name),
                name,
                size_bytes: meta.len() as i64,
            });
        }

        objects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(objects)
    }

    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        validate_object_name(name)?;
        match tokio::fs::remove_file(self.root.join(name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/uploads/{name}", self.public_base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(dir.path().to_path_buf(), String::new())
    }

    #[tokio::test]
    async fn test_put_then_list_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let url = store.put("hello.txt", b"hi there", "text/plain").await.unwrap();
        assert_eq!(url, "/uploads/hello.txt");

        let objects = store.list().await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "hello.txt");
        assert_eq!(objects[0].size_bytes, 8);

        assert!(store.delete("hello.txt").await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_false() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.delete("nothing.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_without_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("never-created"), String::new());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_traversal_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let result = store.put("../escape.txt", b"x", "text/plain").await;
        assert!(matches!(result, Err(StorageError::InvalidName(_))));
    }

    #[test]
    fn test_url_with_public_base() {
        let store = LocalStore::new(PathBuf::from("/tmp/u"), "https://cdn.example.org/".into());
        assert_eq!(store.url_for("a.png"), "https://cdn.example.org/uploads/a.png");
    }
}
