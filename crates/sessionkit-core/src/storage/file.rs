use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::Storage;

/// Stores each key as a file named after it inside one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn item_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            anyhow::bail!("Invalid storage key: {:?}", key);
        }
        Ok(self.dir.join(key))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.item_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read storage file: {}", key)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.item_path(key)?;
        std::fs::create_dir_all(&self.dir).context("Failed to create storage directory")?;
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write storage file: {}", key))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.item_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove storage file: {}", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("nested"));

        assert_eq!(storage.get_item("auth_token").unwrap(), None);

        storage.set_item("auth_token", "abc").unwrap();
        assert_eq!(storage.get_item("auth_token").unwrap().as_deref(), Some("abc"));
        assert!(tmp.path().join("nested").join("auth_token").exists());

        // A second handle on the same directory sees the value
        let reopened = FileStorage::new(storage.dir());
        assert_eq!(reopened.get_item("auth_token").unwrap().as_deref(), Some("abc"));

        storage.remove_item("auth_token").unwrap();
        assert_eq!(storage.get_item("auth_token").unwrap(), None);
        storage.remove_item("auth_token").unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path());
        assert!(storage.set_item("../escape", "x").is_err());
        assert!(storage.set_item("", "x").is_err());
        assert!(storage.get_item(".hidden").is_err());
    }
}
