//! In-memory snapshot store for tests.

use std::{collections::HashMap, io};

use super::{Persistence, Result, SnapshotKey};

/// Holds snapshots in a map. Writes can be switched off to simulate a
/// failing disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: HashMap<SnapshotKey, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` fail until turned off again.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn raw(&self, key: SnapshotKey) -> Option<&str> {
        self.snapshots.get(&key).map(String::as_str)
    }
}

impl Persistence for MemoryStore {
    fn load(&self, key: SnapshotKey) -> Result<Option<String>> {
        Ok(self.snapshots.get(&key).cloned())
    }

    fn save(&mut self, key: SnapshotKey, snapshot: &str) -> Result<()> {
        if self.fail_writes {
            return Err(io::Error::other("disk full").into());
        }
        self.snapshots.insert(key, snapshot.to_string());
        self.writes += 1;
        Ok(())
    }
}
