//! Disk LRU - A disk-backed, size-bounded byte cache
//!
//! Payloads are stored one file per key; an in-memory recency index evicts
//! the least recently used entries once the configured capacity is exceeded.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{DiskCache, SetOutcome};
pub use config::Config;
pub use error::{CacheError, Result};
