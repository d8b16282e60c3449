use super::KeyValueStore;
use crate::error::StoreError;
use ahash::AHashMap;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A key-value store snapshotted to a single bincode file.
///
/// The whole map is rewritten after every mutation. Write failures are logged and
/// the in-memory value still wins, so a full disk never blocks the user.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: AHashMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let bytes = fs::read(&path).map_err(|source| StoreError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Self::decode(&bytes)?
        } else {
            AHashMap::new()
        };
        debug!(path = %path.display(), entries = entries.len(), "Opened field store");
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current snapshot to disk.
    pub fn save(&self) -> Result<(), StoreError> {
        let bytes = encode_to_vec(&self.entries, standard())
            .map_err(|e| StoreError::Codec(format!("Serialization failed: {}", e)))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        fs::write(&self.path, bytes).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn decode(bytes: &[u8]) -> Result<AHashMap<String, String>, StoreError> {
        decode_from_slice(bytes, standard())
            .map(|(entries, _)| entries)
            .map_err(|e| StoreError::Codec(format!("Deserialization failed: {}", e)))
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!(path = %self.path.display(), error = %e, "Could not persist field store");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.persist();
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }
}
