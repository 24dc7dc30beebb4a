//! Key-value storage backends for cart snapshots.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur when reading or writing a stored value.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The backend refuses all access (e.g. disabled by the user agent).
    #[error("storage unavailable")]
    Unavailable,
}

/// Durable key-value storage for raw cart snapshots.
///
/// Implementations store opaque strings; encoding and validation are the
/// cart's concern.
pub trait CartStorage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `raw` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&mut self, key: &str, raw: &str) -> Result<(), StorageError>;
}

/// In-memory storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Storage pre-seeded with one value.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, raw: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), raw.into());
        Self { entries }
    }

    /// The value currently stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, raw: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), raw.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a directory.
///
/// The directory is created on the first write. Writes land in a temporary
/// sibling file that is then renamed over the target, so readers see either
/// the old snapshot or the new one.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the value for `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, key: &str, raw: &str) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;

        debug!(path = %path.display(), bytes = raw.len(), "Saved snapshot");
        Ok(())
    }
}
