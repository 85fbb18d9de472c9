//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::error::{CacheError, Result};

/// Default capacity in bytes (1 MiB)
pub const DEFAULT_MAX_SIZE: u64 = 1 << 20;

/// Disk cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum total payload bytes kept on disk
    pub max_size: u64,
    /// Directory holding one file per cached entry
    pub path: PathBuf,
    /// Wipe the directory when the cache is constructed
    pub clear_on_boot: bool,
}

impl Config {
    /// Builds a config with the given capacity and directory, clearing on boot.
    pub fn new(max_size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            max_size,
            path: path.into(),
            clear_on_boot: true,
        }
    }

    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Capacity in bytes (default: 1048576)
    /// - `CACHE_PATH` - Storage directory (default: `<tmp>/disk_lru`)
    /// - `CACHE_CLEAR_ON_BOOT` - `true`/`false`, `1`/`0` (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_size: env::var("CACHE_MAX_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_size),
            path: env::var_os("CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.path),
            clear_on_boot: env::var("CACHE_CLEAR_ON_BOOT")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.clear_on_boot),
        }
    }

    /// Rejects configurations the cache cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(CacheError::InvalidConfig(
                "storage path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            path: env::temp_dir().join("disk_lru"),
            clear_on_boot: true,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
