//! Guest-identity persistence.
//!
//! Engagement endpoints key likes (and view dedup) on a pseudonymous
//! guest id the client invents and keeps. [`IdentityProvider`] hands out
//! that id, minting and persisting a fresh one on first use. Storage is
//! pluggable through [`KeyValueStore`] so embedders can supply whatever
//! their platform offers; file-backed and in-memory stores ship here.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use meridian_core::guest::{generate_guest_id, validate_guest_id};

/// Storage key under which the guest id is kept.
pub const GUEST_ID_KEY: &str = "meridian.guest_id";

/// Minimal string key/value storage.
///
/// Implementations are best-effort: a failed read behaves like an absent
/// key and a failed write is logged and swallowed. Engagement identity
/// must never break the embedding application; the worst case is a fresh
/// guest id on the next run.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
}

/// Volatile store for tests and short-lived embedders.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }
}

/// Store backed by a single JSON file holding a string map.
///
/// Reads parse the whole file on every call and writes rewrite it; the
/// file holds a handful of entries at most, so simplicity wins over
/// caching.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_entries(&self) -> HashMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read identity store"
                );
                return HashMap::new();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Discarding unparseable identity store"
            );
            HashMap::new()
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read_entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Failed to create identity store directory"
                    );
                    return;
                }
            }
        }

        match serde_json::to_string_pretty(&entries) {
            Ok(serialized) => {
                if let Err(e) = std::fs::write(&self.path, serialized) {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Failed to persist identity store"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to serialize identity store");
            }
        }
    }
}

/// Hands out the stable guest id for this installation.
pub struct IdentityProvider<S> {
    store: S,
}

impl<S: KeyValueStore> IdentityProvider<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Return the persisted guest id, minting and persisting a fresh one
    /// when none is stored. A stored id that fails shape validation is
    /// treated as absent rather than sent to the server.
    pub fn get_or_create(&self) -> String {
        if let Some(existing) = self.store.get(GUEST_ID_KEY) {
            if validate_guest_id(&existing).is_ok() {
                return existing;
            }
            tracing::warn!("Discarding malformed stored guest id");
        }

        let fresh = generate_guest_id();
        self.store.set(GUEST_ID_KEY, &fresh);
        tracing::debug!(guest_id = %fresh, "Generated new guest id");
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v1");
        assert_eq!(store.get("k"), Some("v1".to_string()));
        store.set("k", "v2");
        assert_eq!(store.get("k"), Some("v2".to_string()));
    }

    #[test]
    fn test_get_or_create_is_stable() {
        let provider = IdentityProvider::new(InMemoryStore::new());
        let first = provider.get_or_create();
        let second = provider.get_or_create();
        assert_eq!(first, second);
        assert!(first.starts_with("guest-"));
    }

    #[test]
    fn test_malformed_stored_id_is_replaced() {
        let store = InMemoryStore::new();
        store.set(GUEST_ID_KEY, "not a valid id because of spaces");
        let provider = IdentityProvider::new(store);
        let id = provider.get_or_create();
        assert!(validate_guest_id(&id).is_ok());
        assert_ne!(id, "not a valid id because of spaces");
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");

        let provider = IdentityProvider::new(FileStore::new(&path));
        let id = provider.get_or_create();

        // A brand-new store reading the same file sees the same id.
        let reopened = IdentityProvider::new(FileStore::new(&path));
        assert_eq!(reopened.get_or_create(), id);
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("never-written.json"));
        assert_eq!(store.get(GUEST_ID_KEY), None);
    }

    #[test]
    fn test_file_store_survives_corrupt_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("identity.json");
        std::fs::write(&path, "{{{ not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get(GUEST_ID_KEY), None);

        // Writes recover the file.
        store.set(GUEST_ID_KEY, "guest-1-abc");
        assert_eq!(store.get(GUEST_ID_KEY), Some("guest-1-abc".to_string()));
    }

    #[test]
    fn test_file_store_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/identity.json");
        let store = FileStore::new(&path);
        store.set("k", "v");
        assert_eq!(store.get("k"), Some("v".to_string()));
    }
}
