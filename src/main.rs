//! Disk LRU demo
//!
//! Stores a block of bytes, reads it back and reports stats.

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use disk_lru::{Config, DiskCache};

const DEMO_KEY: &str = "random_bytes";
const DEMO_LEN: usize = 32 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "disk_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_size={}, path={}, clear_on_boot={}",
        config.max_size,
        config.path.display(),
        config.clear_on_boot
    );

    let cache = DiskCache::with_config(&config)
        .await
        .context("failed to open cache directory")?;

    let data = demo_bytes(DEMO_LEN);
    let outcome = cache.set(DEMO_KEY, &data).await;
    info!(?outcome, "Stored {} bytes under {:?}", data.len(), DEMO_KEY);

    match cache.get(DEMO_KEY).await {
        Some(read) if read == data => info!("Data read back from the cache matches"),
        Some(_) => warn!("Data read back from the cache differs from what was stored"),
        None => warn!("Couldn't retrieve the data from the cache"),
    }

    let stats = cache.stats().await;
    info!("Stats: {}", serde_json::to_string(&stats)?);

    cache.clear().await;
    Ok(())
}

/// Deterministic, patterned payload for the demo.
fn demo_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i.wrapping_mul(31) % 251) as u8).collect()
}
