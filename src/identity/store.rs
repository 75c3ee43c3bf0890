//! Persisted identity stores
//!
//! The store is owned by the host; this crate only reads from it.

use crate::error::StoreError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Read-only view of a key-value store holding the session blob
pub trait IdentityStore {
    /// Read the raw value stored under `key`, `None` if absent
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Async variant for stores behind a suspension point
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait AsyncIdentityStore: Send + Sync {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// In-memory store, the stand-in for browser local storage
///
/// Hosts write through [`set`](Self::set) and [`remove`](Self::remove)
/// (login and logout); the resolver only reads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    /// Remove a value, returning it if present
    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl IdentityStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl AsyncIdentityStore for MemoryStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        IdentityStore::read(self, key)
    }
}

/// Store backed by a JSON object file of string values
///
/// ```json
/// { "user": "{\"name\":\"Dana\",\"role\":\"auditor\"}" }
/// ```
///
/// A missing file reads as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonFileStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lookup(contents: &str, key: &str) -> Result<Option<String>, StoreError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        let map = value.as_object().ok_or(StoreError::InvalidLayout)?;

        match map.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(StoreError::InvalidLayout),
        }
    }
}

impl IdentityStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::lookup(&contents, key)
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl AsyncIdentityStore for JsonFileStore {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::lookup(&contents, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // Both store traits are in scope when the async feature is on
    fn read<S: IdentityStore>(store: &S, key: &str) -> Result<Option<String>, StoreError> {
        IdentityStore::read(store, key)
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(read(&store, "user").unwrap().is_none());

        store.set("user", "{}");
        assert_eq!(read(&store, "user").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove("user").as_deref(), Some("{}"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("storage.json"));
        assert!(read(&store, "user").unwrap().is_none());
    }

    #[test]
    fn test_file_store_reads_string_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"user":"{\"role\":\"auditor\"}","theme":"dark"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(
            read(&store, "user").unwrap().as_deref(),
            Some(r#"{"role":"auditor"}"#)
        );
        assert!(read(&store, "missing").unwrap().is_none());
    }

    #[test]
    fn test_file_store_null_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"user":null}"#).unwrap();

        assert!(read(&JsonFileStore::new(&path), "user").unwrap().is_none());
    }

    #[test]
    fn test_file_store_bad_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");

        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            read(&JsonFileStore::new(&path), "user"),
            Err(StoreError::InvalidLayout)
        ));

        std::fs::write(&path, r#"{"user":{"role":"auditor"}}"#).unwrap();
        assert!(matches!(
            read(&JsonFileStore::new(&path), "user"),
            Err(StoreError::InvalidLayout)
        ));

        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            read(&JsonFileStore::new(&path), "user"),
            Err(StoreError::Serialization(_))
        ));
    }
}
