//! Key-value blob store backed by JSON files.

use crate::storage::traits::PersistenceError;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// JsonConnection manages the data directory and reads/writes one JSON blob
/// per key (`{key}.json`).
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: Arc<Mutex<PathBuf>>,
}

impl JsonConnection {
    /// Create a new connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self, PersistenceError> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: Arc::new(Mutex::new(base_path)),
        })
    }

    /// Create a new connection in the default data directory
    /// (~/Documents/Medication Tracker)
    pub fn new_default() -> Result<Self, PersistenceError> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| {
                PersistenceError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine home directory",
                ))
            })?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Medication Tracker");

        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Get the file path backing a key
    pub fn key_path(&self, key: &str) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.join(format!("{}.json", key))
    }

    /// Read the blob stored under a key. Returns None when the key has
    /// never been written.
    pub fn read_value(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.key_path(key);

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Write the blob stored under a key, replacing any previous value
    pub fn write_value(&self, key: &str, contents: &str) -> Result<(), PersistenceError> {
        let path = self.key_path(key);

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> PathBuf {
        let base_dir = self.base_directory.lock().unwrap();
        base_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_key_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        assert!(connection.read_value("medications").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        connection.write_value("medications", "[]").unwrap();
        assert_eq!(
            connection.read_value("medications").unwrap().as_deref(),
            Some("[]")
        );

        // Overwrite replaces the previous value
        connection.write_value("medications", "[1]").unwrap();
        assert_eq!(
            connection.read_value("medications").unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[test]
    fn test_keys_map_to_separate_files() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        connection.write_value("a", "1").unwrap();
        connection.write_value("b", "2").unwrap();

        assert!(temp_dir.path().join("a.json").exists());
        assert!(temp_dir.path().join("b.json").exists());
        assert_eq!(connection.read_value("a").unwrap().as_deref(), Some("1"));
        assert_eq!(connection.read_value("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_creates_missing_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("deeply").join("nested");

        let connection = JsonConnection::new(&nested).unwrap();
        assert!(nested.exists());
        connection.write_value("medications", "[]").unwrap();
        assert!(nested.join("medications.json").exists());
    }
}
