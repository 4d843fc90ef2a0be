//! Bounded, disk-persisted LRU cache over a pluggable key strategy

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{CacheError, Result};
use crate::key::KeyGenerator;

/// On-disk shape of the backing file. Entry order in the `cache` object is
/// the in-memory recency order, most recently used last.
#[derive(Serialize)]
struct CacheFileRef<'a> {
    cache: &'a IndexMap<String, Value>,
}

#[derive(Deserialize)]
struct CacheFile {
    #[serde(default)]
    cache: IndexMap<String, Value>,
}

/// A capacity-bounded LRU cache persisted to a JSON file on every insert.
///
/// Keys are derived from caller arguments by the configured [`KeyGenerator`],
/// values are arbitrary JSON. `get` refreshes an entry's recency and returns
/// the value serialized to a string; `add` inserts at the most-recently-used
/// position, evicting the least recently touched entry when full, then
/// rewrites the whole backing file.
///
/// Neither operation can fail from the caller's point of view: load and save
/// problems are logged and the cache degrades to in-memory-only behavior.
/// One instance owns its backing file; sharing the file between processes is
/// unsupported.
pub struct PersistentCache<G> {
    entries: Arc<Mutex<IndexMap<String, Value>>>,
    path: PathBuf,
    max_size: usize,
    key_gen: G,
}

impl<G> PersistentCache<G> {
    /// Open a cache backed by `path`, loading any previously persisted
    /// entries in file order (oldest first).
    ///
    /// A missing backing file starts the cache empty; an unreadable or
    /// malformed one is logged and also starts it empty. A `max_size` of
    /// zero disables caching entirely: `add` stores nothing and `get`
    /// always misses.
    pub async fn open(path: impl Into<PathBuf>, max_size: usize, key_gen: G) -> Self {
        let path = path.into();
        let entries = load_entries(&path).await;
        Self {
            entries: Arc::new(Mutex::new(entries)),
            path,
            max_size,
            key_gen,
        }
    }

    /// Look up the entry for `args`.
    ///
    /// On a hit the entry moves to the most-recently-used position and its
    /// value is returned JSON-serialized; on a miss this returns `None`.
    /// Never touches the backing file.
    pub async fn get<A>(&self, args: A) -> Option<String>
    where
        G: KeyGenerator<A>,
    {
        if self.max_size == 0 {
            return None;
        }

        let key = self.key_gen.generate_key(args);
        let mut entries = self.entries.lock().await;
        match entries.shift_remove(&key) {
            Some(value) => {
                let payload =
                    serde_json::to_string(&value).unwrap_or_else(|_| value.to_string());
                entries.insert(key.clone(), value);
                debug!(%key, "cache hit");
                Some(payload)
            }
            None => {
                debug!(%key, "cache miss");
                None
            }
        }
    }

    /// Store `value` under the key derived from `args`, then persist the
    /// whole cache to the backing file.
    ///
    /// An existing entry for the same key is replaced and refreshed; when a
    /// new key arrives at capacity, the least recently touched entry is
    /// evicted first. A failed save is logged and swallowed, leaving the
    /// in-memory entry authoritative.
    pub async fn add<A>(&self, value: Value, args: A)
    where
        G: KeyGenerator<A>,
    {
        if self.max_size == 0 {
            return;
        }

        let key = self.key_gen.generate_key(args);
        let mut entries = self.entries.lock().await;
        if entries.shift_remove(&key).is_none() && entries.len() >= self.max_size {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                debug!(key = %evicted, "evicted least recently used entry");
            }
        }
        entries.insert(key.clone(), value);
        debug!(%key, entries = entries.len(), "stored cache entry");

        // Saving under the same lock acquisition as the insert keeps
        // concurrent adds from interleaving their file writes.
        if let Err(err) = self.save(&entries).await {
            warn!(
                path = %self.path.display(),
                error = %err,
                "failed to persist cache, entry retained in memory"
            );
        }
    }

    /// Number of resident entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache currently holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn save(&self, entries: &IndexMap<String, Value>) -> Result<()> {
        let payload = serde_json::to_string(&CacheFileRef { cache: entries })?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, payload).await?;
        Ok(())
    }
}

impl<G: Clone> Clone for PersistentCache<G> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            path: self.path.clone(),
            max_size: self.max_size,
            key_gen: self.key_gen.clone(),
        }
    }
}

async fn load_entries(path: &Path) -> IndexMap<String, Value> {
    match try_load(path).await {
        Ok(entries) => {
            if !entries.is_empty() {
                debug!(path = %path.display(), entries = entries.len(), "loaded cache file");
            }
            entries
        }
        Err(CacheError::Io(err)) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no cache file yet, starting empty");
            IndexMap::new()
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "could not load cache file, starting empty"
            );
            IndexMap::new()
        }
    }
}

async fn try_load(path: &Path) -> Result<IndexMap<String, Value>> {
    let bytes = tokio::fs::read(path).await?;
    let file: CacheFile = serde_json::from_slice(&bytes)?;
    Ok(file.cache)
}
