//! Key Codec Module
//!
//! Maps logical cache keys onto fixed-length, filesystem-safe blob identifiers.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use xxhash_rust::xxh64::xxh64;

/// Length of every identifier produced by [`encode_key`].
pub const ENCODED_KEY_LEN: usize = 12;

const KEY_HASH_SEED: u64 = 0;

// == Encode Key ==
/// Derives the blob identifier for a key.
///
/// The xxh64 digest is base64-encoded with the URL-safe alphabet, so the
/// result never contains a path separator. Collisions alias two keys to one
/// blob and are not detected.
pub fn encode_key(key: &str) -> String {
    let digest = xxh64(key.as_bytes(), KEY_HASH_SEED);
    URL_SAFE.encode(digest.to_be_bytes())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_encode_is_deterministic() {
        assert_eq!(encode_key("random_bytes"), encode_key("random_bytes"));
    }

    #[test]
    fn test_encode_fixed_length() {
        let long = "x".repeat(10_000);
        for key in ["", "a", "lru.go", long.as_str()] {
            assert_eq!(encode_key(key).len(), ENCODED_KEY_LEN);
        }
    }

    #[test]
    fn test_encode_is_filesystem_safe() {
        for key in ["../../etc/passwd", "a/b\\c", "key with spaces", "ünïcødé"] {
            let id = encode_key(key);
            assert!(
                id.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='),
                "unexpected character in {}",
                id
            );
        }
    }

    #[test]
    fn test_encode_distinct_keys() {
        let ids: HashSet<String> = (0..10_000).map(|i| encode_key(&format!("key{}", i))).collect();
        assert_eq!(ids.len(), 10_000);
    }
}
