//! The key-value byte store the transaction list is persisted to.

use crate::{utils, Result};
use anyhow::bail;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// A byte store addressed by string keys. Writes replace whatever was stored under the key.
pub trait KeyValueStore: Send {
    /// Returns `None` when nothing has been stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;
}

/// Stores each key as `<dir>/<key>.json`. Writes go to `<key>.json.tmp` first and are renamed into
/// place, so an interrupted write never leaves a truncated `<key>.json` behind.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        utils::make_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file that backs `key`.
    pub fn path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            bail!("'{key}' cannot be used as a storage key");
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key)?;
        if !path.is_file() {
            trace!("nothing stored at {}", path.display());
            return Ok(None);
        }
        utils::read_bytes(&path).map(Some)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");
        trace!("writing {} bytes to {}", value.len(), path.display());
        utils::write(&tmp, value)?;
        utils::rename(&tmp, &path)
    }
}

/// Holds values in memory. Clones share the same map, so a caller can hand one clone to a
/// `TransactionStore` and inspect what it wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    data: HashMap<String, Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `value` under `key`.
    pub fn with_value(key: &str, value: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_string(), value.into());
        store
    }

    /// The number of `set` calls made so far.
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    /// A copy of the value under `key`.
    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let mut inner = self.lock();
        inner.writes += 1;
        inner.data.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
