//! Cache Module
//!
//! In-memory TTL caching of API responses, split into per-domain stores with
//! capacity eviction and an optional persisted snapshot.

mod clock;
mod entry;
mod key;
mod order;
mod registry;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use key::{cache_key, ParamValue, RequestParams};
pub use order::WriteOrder;
pub use registry::{CacheDomain, CacheRegistry, RegistrySnapshot, SNAPSHOT_KEY};
pub use stats::CacheStats;
pub use store::CacheStore;
