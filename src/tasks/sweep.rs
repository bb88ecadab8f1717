//! Expired Entry Sweep
//!
//! Background task that periodically drops expired entries from every cache
//! domain. Reads already treat expired entries as absent; the sweep only
//! bounds memory held by entries nobody reads again.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheRegistry;

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it on shutdown.
///
/// # Example
/// ```ignore
/// let registry = Arc::new(CacheRegistry::new(&config, Arc::new(SystemClock)));
/// let sweep_handle = spawn_sweep_task(registry.clone(), Duration::from_secs(60));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task(registry: Arc<CacheRegistry>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache sweep task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let removed = registry.clear_expired().await;

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
