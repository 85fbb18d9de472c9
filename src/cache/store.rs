//! Cache Store Module
//!
//! Main cache engine combining the LRU tracker with the on-disk blob store.

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::cache::{encode_key, BlobStore, CacheStats, LruTracker};
use crate::config::Config;
use crate::error::Result;

// == Set Outcome ==
/// What a call to [`DiskCache::set`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// New entry written and indexed
    Inserted,
    /// Key already cached; promoted without rewriting the payload
    Touched,
    /// Payload larger than the whole capacity; dropped
    TooLarge,
    /// A blob already sits at the key's location without an index entry; ignored
    AlreadyStored,
    /// Storage failed; nothing was indexed
    WriteFailed,
}

/// Mutable engine state, guarded by a single lock.
#[derive(Debug, Default)]
pub(crate) struct CacheState {
    pub(crate) lru: LruTracker,
    pub(crate) current_size: u64,
    stats: CacheStats,
}

// == Disk Cache ==
/// Size-bounded cache persisting each payload as a file.
///
/// Every operation holds the state lock for its whole duration, storage
/// I/O included. Share between tasks with `Arc<DiskCache>`.
#[derive(Debug)]
pub struct DiskCache {
    pub(crate) state: Mutex<CacheState>,
    blobs: BlobStore,
    max_size: u64,
}

impl DiskCache {
    // == Constructors ==
    /// Creates a cache of `max_size` bytes in `path`, wiping the directory first.
    pub async fn new(max_size: u64, path: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(&Config::new(max_size, path.as_ref())).await
    }

    /// Creates a cache from a [`Config`].
    ///
    /// Clearing the directory is best-effort; failing to create it is an error.
    /// Files already present are never indexed.
    pub async fn with_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let blobs = BlobStore::new(&config.path);
        if config.clear_on_boot {
            debug!(path = %config.path.display(), "Clearing cache on boot");
            blobs.reset().await?;
        } else {
            blobs.ensure_root().await?;
        }

        info!(
            path = %config.path.display(),
            max_size = config.max_size,
            "New disk cache"
        );

        Ok(Self {
            state: Mutex::new(CacheState::default()),
            blobs,
            max_size: config.max_size,
        })
    }

    // == Get ==
    /// Retrieves the payload stored under `key`, promoting it to most recent.
    ///
    /// An unreadable blob yields `None` but leaves the entry indexed.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut state = self.state.lock().await;

        if !state.lru.promote(key) {
            state.stats.record_miss();
            return None;
        }

        match self.blobs.read(&encode_key(key)).await {
            Ok(value) => {
                state.stats.record_hit();
                Some(value)
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read cached blob");
                state.stats.record_miss();
                None
            }
        }
    }

    /// Like [`get`](Self::get), but reads into a caller-owned buffer.
    ///
    /// Returns true on a hit, with `buf` holding exactly the payload.
    pub async fn get_into(&self, key: &str, buf: &mut Vec<u8>) -> bool {
        let mut state = self.state.lock().await;

        if !state.lru.promote(key) {
            state.stats.record_miss();
            return false;
        }

        match self.blobs.read_into(&encode_key(key), buf).await {
            Ok(_) => {
                state.stats.record_hit();
                true
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read cached blob");
                buf.clear();
                state.stats.record_miss();
                false
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key`.
    ///
    /// Payloads are write-once per key: setting a cached key only promotes
    /// it. New entries larger than the capacity are dropped, and a blob
    /// already on disk at the key's location is never overwritten. After a
    /// successful insert, least recently used entries are evicted until the
    /// cache fits again.
    pub async fn set(&self, key: &str, value: &[u8]) -> SetOutcome {
        let mut state = self.state.lock().await;

        if state.lru.promote(key) {
            return SetOutcome::Touched;
        }

        let size = value.len() as u64;
        debug!(key, size, "New object");

        if size > self.max_size {
            debug!(key, size, max_size = self.max_size, "Object is too large");
            state.stats.record_rejection();
            return SetOutcome::TooLarge;
        }

        let id = encode_key(key);
        match self.blobs.exists(&id).await {
            Ok(false) => {}
            Ok(true) => {
                debug!(key, id = %id, "Blob already exists, ignoring set");
                return SetOutcome::AlreadyStored;
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to check blob");
                return SetOutcome::WriteFailed;
            }
        }

        if let Err(e) = self.blobs.write(&id, value).await {
            warn!(key, error = %e, "Failed to write blob");
            // A partial file would otherwise block every later set for this key
            if let Err(e) = self.blobs.delete(&id).await {
                warn!(key, error = %e, "Failed to remove partially written blob");
            }
            return SetOutcome::WriteFailed;
        }

        state.lru.promote_or_insert(key, size);
        state.current_size += size;
        debug!(key, size, current_size = state.current_size, "Added object");

        self.trim(&mut state).await;
        SetOutcome::Inserted
    }

    // == Delete ==
    /// Removes `key` and its blob.
    ///
    /// Returns false if the key is not cached or the blob could not be
    /// deleted; in the latter case the entry stays indexed.
    pub async fn delete(&self, key: &str) -> bool {
        let mut state = self.state.lock().await;

        if !state.lru.contains(key) {
            return false;
        }

        if let Err(e) = self.blobs.delete(&encode_key(key)).await {
            warn!(key, error = %e, "Failed to delete blob");
            return false;
        }

        if let Some(entry) = state.lru.remove(key) {
            state.current_size -= entry.size;
        }
        true
    }

    // == Clear ==
    /// Deletes every indexed blob (best-effort) and empties the cache.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;

        let ids: Vec<String> = state.lru.keys().map(encode_key).collect();
        let removed = self.blobs.delete_all(&ids).await;
        if removed < ids.len() {
            warn!(
                failed = ids.len() - removed,
                "Some blobs could not be removed during clear"
            );
        }

        state.lru.clear();
        state.current_size = 0;
        info!(removed, "Cache cleared");
    }

    // == Introspection ==
    /// Sum of the sizes of all cached entries.
    pub async fn current_size(&self) -> u64 {
        self.state.lock().await.current_size
    }

    /// Capacity in bytes, fixed at construction.
    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Last access time of the least recently used entry.
    pub async fn oldest(&self) -> Option<DateTime<Utc>> {
        let state = self.state.lock().await;
        state.lru.peek_oldest().map(|entry| entry.last_access)
    }

    /// Checks whether `key` is indexed, without promoting it.
    pub async fn contains(&self, key: &str) -> bool {
        self.state.lock().await.lru.contains(key)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.lru.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.lru.is_empty()
    }

    /// Storage directory.
    pub fn path(&self) -> &Path {
        self.blobs.root()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        let mut stats = state.stats.clone();
        stats.set_totals(state.lru.len(), state.current_size);
        stats
    }

    // == Trim ==
    /// Evicts least recently used entries until the cache fits.
    async fn trim(&self, state: &mut CacheState) {
        while state.current_size > self.max_size {
            let Some(entry) = state.lru.evict_oldest() else {
                // Only reachable if accounting drifted; resync with the empty index.
                error!(
                    current_size = state.current_size,
                    max_size = self.max_size,
                    "Nothing left to evict, resetting size accounting"
                );
                state.current_size = 0;
                break;
            };

            let id = encode_key(&entry.key);
            debug!(key = %entry.key, id = %id, size = entry.size, "Evicting");
            if let Err(e) = self.blobs.delete(&id).await {
                warn!(key = %entry.key, error = %e, "Couldn't delete evicted blob");
            }

            state.current_size -= entry.size;
            state.stats.record_eviction();
        }
    }
}
