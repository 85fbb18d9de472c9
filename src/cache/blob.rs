//! Blob Store Module
//!
//! Thin wrapper over a storage directory holding one file per identifier.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::error::{CacheError, Result};

// == Blob Store ==
/// Stores payload bytes as files directly under a root directory.
///
/// Holds no mutable state; the cache engine serializes access to it.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Creates a store rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the blobs.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the blob for `id`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    // == Exists ==
    /// Checks whether anything is stored under `id`.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let path = self.path_for(id);
        match fs::symlink_metadata(&path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CacheError::storage(path, e)),
        }
    }

    // == Write ==
    /// Persists `bytes` under `id`, replacing any existing file.
    pub async fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(id);
        fs::write(&path, bytes)
            .await
            .map_err(|e| CacheError::storage(path, e))
    }

    // == Read ==
    /// Returns the full contents stored under `id`.
    pub async fn read(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.path_for(id);
        fs::read(&path).await.map_err(|e| CacheError::storage(path, e))
    }

    /// Reads the blob into `buf`, replacing its contents and keeping its allocation.
    ///
    /// Returns the number of bytes read. On error `buf` may hold a partial read.
    pub async fn read_into(&self, id: &str, buf: &mut Vec<u8>) -> Result<usize> {
        let path = self.path_for(id);
        buf.clear();
        let mut file = fs::File::open(&path)
            .await
            .map_err(|e| CacheError::storage(&path, e))?;
        file.read_to_end(buf)
            .await
            .map_err(|e| CacheError::storage(&path, e))
    }

    // == Delete ==
    /// Removes the blob for `id`. A missing blob is not an error.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let path = self.path_for(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::storage(path, e)),
        }
    }

    // == Delete All ==
    /// Best-effort removal of every listed blob.
    ///
    /// Failures are logged and skipped. Returns how many deletions succeeded.
    pub async fn delete_all(&self, ids: &[String]) -> usize {
        let mut removed = 0;
        for id in ids {
            match self.delete(id).await {
                Ok(()) => removed += 1,
                Err(e) => warn!(error = %e, "Failed to delete blob"),
            }
        }
        removed
    }

    // == Reset ==
    /// Wipes the whole directory and recreates it empty.
    ///
    /// Removal is best-effort; only failing to recreate the directory is an error.
    pub async fn reset(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root).await {
            Ok(()) => debug!(root = %self.root.display(), "Removed storage directory"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(root = %self.root.display(), error = %e, "Failed to clear storage directory"),
        }
        self.ensure_root().await
    }

    /// Creates the root directory (and parents) if missing.
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CacheError::storage(&self.root, e))
    }
}
