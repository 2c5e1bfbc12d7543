// 💾 Store - opaque string-keyed persistence boundary
// One trait, one file-backed implementation, one in-memory test double

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// STORE TRAIT
// ============================================================================

/// String-keyed persistence substrate.
///
/// The ledger only ever needs get/set/remove of whole values, so the
/// substrate stays swappable: a directory of files in the binary, a plain
/// map in tests.
pub trait Store {
    /// Read the stored value, `None` when the key was never set.
    fn get(&self, key: &str) -> Option<String>;

    /// Write (or overwrite) the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete the key; removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ============================================================================
// FILE STORE
// ============================================================================

/// Store backed by one JSON file per key inside a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a file store rooted at `dir`.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {:?}", dir))?;

        Ok(FileStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        // Unreadable counts the same as absent; the caller treats both
        // as "no prior data".
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write store file: {:?}", path))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove store file: {:?}", path))?;
        }
        Ok(())
    }
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
