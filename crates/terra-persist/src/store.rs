//! String key/value backends.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::PersistError;

/// A flat string store keyed by short names such as `earth-heights-v1`.
pub trait KeyValueStore {
    /// Fetch a value; `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Insert or replace a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Delete a value. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// In-memory store, used headless and in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Use `dir` as the backing directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, PersistError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistError::ReadError {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        let write_err = |source| PersistError::WriteError {
            key: key.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(write_err)?;
        std::fs::write(&path, value).map_err(write_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistError::WriteError {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_dir_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::new(dir.path().join("saves"));
        assert_eq!(store.get("camera-state-v1").unwrap(), None);

        store.set("camera-state-v1", "{}").unwrap();
        assert!(dir.path().join("saves/camera-state-v1.json").exists());
        assert_eq!(store.get("camera-state-v1").unwrap().as_deref(), Some("{}"));

        store.remove("camera-state-v1").unwrap();
        assert_eq!(store.get("camera-state-v1").unwrap(), None);
        store.remove("camera-state-v1").unwrap();
    }

    #[test]
    fn test_dir_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DirStore::new(dir.path());
        for key in ["", "../escape", "a/b", "dot.json"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(PersistError::InvalidKey(_))
            ));
        }
    }
}
