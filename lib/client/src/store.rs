//! Durable session record.
//!
//! One named JSON record holding exactly the token and the user profile.
//! The session writes it through on every mutation and reads it once at
//! startup.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::User;

/// File name of the persisted record inside the store directory.
pub const SESSION_FILE: &str = "session.json";

/// The persisted slice of session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user: User,
}

/// Persistence seam for the session record.
pub trait SessionStore: Send + Sync {
    /// Read the record. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedSession>, StoreError>;

    /// Overwrite the record.
    fn save(&self, record: &PersistedSession) -> Result<(), StoreError>;

    /// Remove the record. Removing an absent record is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

/// JSON-file-backed store: `{dir}/session.json`.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<PersistedSession>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&content)?;
        Ok(Some(record))
    }

    fn save(&self, record: &PersistedSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(record)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and embedders that manage persistence
/// themselves.
#[derive(Default)]
pub struct MemoryStore {
    record: Mutex<Option<PersistedSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<PersistedSession>, StoreError> {
        Ok(self.record.lock().expect("store lock").clone())
    }

    fn save(&self, record: &PersistedSession) -> Result<(), StoreError> {
        *self.record.lock().expect("store lock") = Some(record.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.record.lock().expect("store lock") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersistedSession {
        PersistedSession {
            token: "tok-123".to_string(),
            user: User {
                id: Some("u1".to_string()),
                name: "Ada".to_string(),
                email: "ada@x.io".to_string(),
            },
        }
    }

    #[test]
    fn file_store_round_trips_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.load().unwrap(), None);

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.clear().unwrap();

        store.save(&sample()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn file_store_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested/state"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn memory_store_round_trips_the_record() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
