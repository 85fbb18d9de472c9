//! Error types for the disk cache
//!
//! Provides unified error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the disk cache.
///
/// Public cache operations absorb these into misses and `false` results;
/// they surface only from the blob store, configuration and construction.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Underlying read, write or delete failed
    #[error("Storage I/O failed for {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration rejected before the cache was built
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl CacheError {
    /// Wraps an I/O error with the path it happened on.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CacheError::Storage {
            path: path.into(),
            source,
        }
    }

    /// True if this is a storage error caused by a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CacheError::Storage { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

// == Result Type Alias ==
/// Convenience Result type for the disk cache.
pub type Result<T> = std::result::Result<T, CacheError>;
