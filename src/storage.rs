//! Local persistence for check-in snapshots.
//!
//! Each snapshot is one pretty-printed JSON file under the storage root:
//!
//! ```text
//! <root>/
//!   station-directory.json   # Attendees with their station flags
//!   step-directory.json      # Attendees with their required step
//!   current-step.json        # The sequential session's current step
//! ```
//!
//! Snapshots are whole-value overwrites. There is no journal and no
//! migration between versions.

#[cfg(test)]
mod memory;

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::model::TagId;

#[cfg(test)]
pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot {key} is unreadable: {source}")]
    Corrupt {
        key: SnapshotKey,
        source: serde_json::Error,
    },

    #[error("snapshot {key} has an impossible record for {tag}")]
    Inconsistent { key: SnapshotKey, tag: TagId },
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Names a snapshot slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    StationDirectory,
    StepDirectory,
    CurrentStep,
}

impl SnapshotKey {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::StationDirectory => "station-directory.json",
            Self::StepDirectory => "step-directory.json",
            Self::CurrentStep => "current-step.json",
        }
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Load and save of raw snapshots by key.
pub trait Persistence {
    /// Returns the stored snapshot, or `None` if nothing was saved under `key`.
    fn load(&self, key: SnapshotKey) -> Result<Option<String>>;

    /// Replaces the snapshot under `key`.
    fn save(&mut self, key: SnapshotKey, snapshot: &str) -> Result<()>;
}

/// Loads and decodes the snapshot under `key`.
pub fn load_snapshot<T, S>(store: &S, key: SnapshotKey) -> Result<Option<T>>
where
    T: DeserializeOwned,
    S: Persistence + ?Sized,
{
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StorageError::Corrupt { key, source })
}

/// Encodes `value` and saves it under `key`.
pub fn save_snapshot<T, S>(store: &mut S, key: SnapshotKey, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: Persistence + ?Sized,
{
    let json = serde_json::to_string_pretty(value)?;
    store.save(key, &json)
}

/// Local file-based snapshot storage.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the default storage root: `~/.checkin/data/`.
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".checkin").join("data"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, key: SnapshotKey) -> PathBuf {
        self.root.join(key.file_name())
    }
}

impl Persistence for Storage {
    fn load(&self, key: SnapshotKey) -> Result<Option<String>> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(json) => {
                debug!(path = %path.display(), "loaded snapshot");
                Ok(Some(json))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: SnapshotKey, snapshot: &str) -> Result<()> {
        let path = self.path(key);
        fs::write(&path, snapshot)?;
        debug!(path = %path.display(), bytes = snapshot.len(), "saved snapshot");
        Ok(())
    }
}
