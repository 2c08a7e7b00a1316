//! Named blob storage for persisting serialized state to disk.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Key under which the record collection is persisted.
pub const RECORDS_KEY: &str = "glicemiaRecords";

/// A store of named text blobs.
///
/// Every write replaces the whole blob for its key.
pub trait BlobStorage {
    /// Reads the blob for `key`. Returns `Ok(None)` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites the blob for `key`.
    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError>;
}

/// Blob storage backed by one JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    pub fn exists(&self, key: &str) -> bool {
        self.path(key).exists()
    }
}

impl BlobStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(path, e)),
        }
    }

    /// Creates the data directory if it doesn't exist.
    fn write(&self, key: &str, contents: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.data_dir)
            .map_err(|e| StorageError::IoError(self.data_dir.clone(), e))?;

        let path = self.path(key);
        fs::write(&path, contents).map_err(|e| StorageError::IoError(path, e))?;

        Ok(())
    }
}

/// Errors that can occur during blob storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing a file.
    IoError(PathBuf, io::Error),
    /// The backend refused the write.
    Unavailable(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::Unavailable(reason) => write!(f, "Storage unavailable: {}", reason),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
            StorageError::Unavailable(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    #[test]
    fn test_storage_path() {
        let (storage, _temp) = test_storage();
        let path = storage.path(RECORDS_KEY);
        assert!(path.ends_with("glicemiaRecords.json"));
    }

    #[test]
    fn test_read_nonexistent_returns_none() {
        let (storage, _temp) = test_storage();
        assert!(storage.read(RECORDS_KEY).unwrap().is_none());
        assert!(!storage.exists(RECORDS_KEY));
    }

    #[test]
    fn test_write_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let storage = FileStorage::new(nested_dir.clone());

        storage.write(RECORDS_KEY, "[]").unwrap();

        assert!(nested_dir.exists());
        assert!(storage.exists(RECORDS_KEY));
    }

    #[test]
    fn test_write_overwrites_whole_blob() {
        let (storage, _temp) = test_storage();

        storage.write(RECORDS_KEY, "first version, quite long").unwrap();
        storage.write(RECORDS_KEY, "second").unwrap();

        assert_eq!(storage.read(RECORDS_KEY).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_keys_are_independent() {
        let (storage, _temp) = test_storage();

        storage.write("a", "1").unwrap();
        storage.write("b", "2").unwrap();

        assert_eq!(storage.read("a").unwrap().as_deref(), Some("1"));
        assert_eq!(storage.read("b").unwrap().as_deref(), Some("2"));
    }
}
