//! Cache Module
//!
//! Disk-backed byte cache with size-bounded LRU eviction.

mod blob;
mod codec;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use blob::BlobStore;
pub use codec::{encode_key, ENCODED_KEY_LEN};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{DiskCache, SetOutcome};
