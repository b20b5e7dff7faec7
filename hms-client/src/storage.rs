//! Snapshot persistence
//!
//! Small JSON documents (signed-in user, selected property) kept on disk so a
//! restarted client comes back in the same state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key of the signed-in user snapshot
pub const USER_KEY: &str = "hms_user";
/// Key of the selected property snapshot
pub const PROPERTY_KEY: &str = "hms_property";

/// Key/value store of JSON files: `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the snapshot directory if missing
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(self.path(key), json)
    }

    /// Missing or unparsable files read as `None`
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path(key);
        if !path.exists() {
            return None;
        }
        let json = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable snapshot");
                None
            }
        }
    }

    pub fn delete(&self, key: &str) -> std::io::Result<()> {
        let path = self.path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path(key).exists()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::UserSnapshot;

    #[test]
    fn test_save_load_delete() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path().join("state"));

        assert!(store.load::<UserSnapshot>(USER_KEY).is_none());

        let user = UserSnapshot::from_email("desk@hotel.test");
        store.save(USER_KEY, &user).unwrap();
        assert!(store.exists(USER_KEY));
        assert_eq!(store.load::<UserSnapshot>(USER_KEY), Some(user));

        store.delete(USER_KEY).unwrap();
        assert!(!store.exists(USER_KEY));
        // deleting twice is fine
        store.delete(USER_KEY).unwrap();
    }

    #[test]
    fn test_corrupt_file_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(tmp.path());
        fs::write(tmp.path().join("hms_property.json"), "{not json").unwrap();
        assert!(store.load::<serde_json::Value>(PROPERTY_KEY).is_none());
    }
}
