//! Cache Entry Module
//!
//! Defines the in-memory metadata kept for each cached key.

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// Metadata for one cached item. The payload itself lives in the blob store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEntry {
    /// The logical key
    pub key: String,
    /// Payload length in bytes, fixed at insertion
    pub size: u64,
    /// Time of the most recent get or set touching this entry
    pub last_access: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry accessed now.
    ///
    /// # Arguments
    /// * `key` - The logical key
    /// * `size` - Payload length in bytes
    pub fn new(key: String, size: u64) -> Self {
        Self {
            key,
            size,
            last_access: Utc::now(),
        }
    }

    // == Touch ==
    /// Refreshes the access timestamp.
    pub fn touch(&mut self) {
        self.last_access = Utc::now();
    }
}
