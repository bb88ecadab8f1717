//! Cache Registry Module
//!
//! One `CacheStore` per data domain, each with its own TTL, plus an optional
//! mirror that writes the whole registry to local storage after every change.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, CacheStore, Clock, RequestParams};
use crate::config::Config;
use crate::error::StorageError;
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized registry.
pub const SNAPSHOT_KEY: &str = "cache.snapshot";

// == Cache Domain ==
/// Data category with an independent store and TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheDomain {
    /// Titles, series, credits, videos
    Catalog,
    /// Genre lists and genre discovery listings
    Discovery,
    /// Person profiles, credits and images
    Person,
    /// Search results
    Search,
}

impl CacheDomain {
    pub const ALL: [CacheDomain; 4] = [
        CacheDomain::Catalog,
        CacheDomain::Discovery,
        CacheDomain::Person,
        CacheDomain::Search,
    ];

    pub fn default_ttl(self) -> Duration {
        match self {
            CacheDomain::Catalog => Duration::from_secs(10 * 60),
            CacheDomain::Discovery => Duration::from_secs(60 * 60),
            CacheDomain::Person => Duration::from_secs(30 * 60),
            CacheDomain::Search => Duration::from_secs(5 * 60),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CacheDomain::Catalog => "catalog",
            CacheDomain::Discovery => "discovery",
            CacheDomain::Person => "person",
            CacheDomain::Search => "search",
        }
    }
}

impl fmt::Display for CacheDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Serialized form of the registry: domain to `[key, entry]` pairs, oldest first.
pub type RegistrySnapshot = BTreeMap<CacheDomain, Vec<(String, CacheEntry)>>;

// == Cache Registry ==
/// The four domain stores shared by every gateway call.
///
/// Created once at start and shared through an `Arc`.
pub struct CacheRegistry {
    catalog: RwLock<CacheStore>,
    discovery: RwLock<CacheStore>,
    person: RwLock<CacheStore>,
    search: RwLock<CacheStore>,
    persistence: Option<Arc<dyn KeyValueStorage>>,
    /// Held across snapshot-and-write so persisted copies land in order.
    persist_lock: Mutex<()>,
}

impl CacheRegistry {
    // == Constructors ==
    /// Creates an empty in-memory registry using the TTLs and bound from `config`.
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> Self {
        let [catalog, discovery, person, search] =
            CacheDomain::ALL.map(|domain| build_store(config, domain, clock.clone()));

        Self {
            catalog: RwLock::new(catalog),
            discovery: RwLock::new(discovery),
            person: RwLock::new(person),
            search: RwLock::new(search),
            persistence: None,
            persist_lock: Mutex::new(()),
        }
    }

    /// Creates a registry mirrored to `storage`, loading any snapshot found there.
    ///
    /// An unreadable or corrupt snapshot is logged and the registry starts empty.
    pub fn restore(config: &Config, clock: Arc<dyn Clock>, storage: Arc<dyn KeyValueStorage>) -> Self {
        let mut stores = CacheDomain::ALL.map(|domain| build_store(config, domain, clock.clone()));

        match load_snapshot(storage.as_ref()) {
            Some(mut snapshot) => {
                for (domain, store) in CacheDomain::ALL.iter().zip(stores.iter_mut()) {
                    let entries = snapshot.remove(domain).unwrap_or_default();
                    let loaded = store.restore(entries);
                    debug!(%domain, loaded, "restored cache domain");
                }
                info!("Cache snapshot restored");
            }
            None => debug!("no cache snapshot to restore"),
        }

        let [catalog, discovery, person, search] = stores;
        Self {
            catalog: RwLock::new(catalog),
            discovery: RwLock::new(discovery),
            person: RwLock::new(person),
            search: RwLock::new(search),
            persistence: Some(storage),
            persist_lock: Mutex::new(()),
        }
    }

    fn store(&self, domain: CacheDomain) -> &RwLock<CacheStore> {
        match domain {
            CacheDomain::Catalog => &self.catalog,
            CacheDomain::Discovery => &self.discovery,
            CacheDomain::Person => &self.person,
            CacheDomain::Search => &self.search,
        }
    }

    // == Get ==
    /// Looks up a cached payload in one domain.
    pub async fn get(
        &self,
        domain: CacheDomain,
        endpoint: &str,
        params: &RequestParams,
    ) -> Option<Value> {
        // Write lock: expired entries are removed on read
        let mut store = self.store(domain).write().await;
        store.get(endpoint, params)
    }

    // == Set ==
    /// Stores a payload in one domain and refreshes the persisted snapshot.
    pub async fn set(
        &self,
        domain: CacheDomain,
        endpoint: &str,
        params: &RequestParams,
        payload: Value,
    ) {
        {
            let mut store = self.store(domain).write().await;
            store.set(endpoint, params, payload);
        }
        self.persist().await;
    }

    // == Clear ==
    /// Removes every entry in one domain, persisted copy included.
    pub async fn clear(&self, domain: CacheDomain) {
        self.store(domain).write().await.clear();
        info!(%domain, "cache domain cleared");
        self.persist().await;
    }

    /// Removes every entry in every domain and drops the persisted snapshot.
    pub async fn clear_all(&self) {
        let _guard = self.persist_lock.lock().await;
        for domain in CacheDomain::ALL {
            self.store(domain).write().await.clear();
        }
        info!("all cache domains cleared");

        if let Some(storage) = &self.persistence {
            if let Err(err) = storage.remove(SNAPSHOT_KEY) {
                warn!(error = %err, "failed to remove cache snapshot");
            }
        }
    }

    // == Clear Expired ==
    /// Sweeps expired entries from every domain. Returns the total removed.
    pub async fn clear_expired(&self) -> usize {
        let mut removed = 0;
        for domain in CacheDomain::ALL {
            removed += self.store(domain).write().await.clear_expired();
        }

        if removed > 0 {
            self.persist().await;
        }
        removed
    }

    // == Stats ==
    pub async fn stats(&self, domain: CacheDomain) -> CacheStats {
        self.store(domain).read().await.stats()
    }

    /// Number of entries held in one domain.
    pub async fn len(&self, domain: CacheDomain) -> usize {
        self.store(domain).read().await.len()
    }

    // == Snapshot ==
    /// Copies out every domain's entries.
    pub async fn snapshot(&self) -> RegistrySnapshot {
        let mut snapshot = RegistrySnapshot::new();
        for domain in CacheDomain::ALL {
            snapshot.insert(domain, self.store(domain).read().await.snapshot());
        }
        snapshot
    }

    /// Writes the full snapshot to storage. Failures are logged, never returned:
    /// the in-memory stores stay authoritative.
    async fn persist(&self) {
        let Some(storage) = &self.persistence else {
            return;
        };

        let _guard = self.persist_lock.lock().await;
        let snapshot = self.snapshot().await;
        let result = serde_json::to_string(&snapshot)
            .map_err(StorageError::from)
            .and_then(|json| storage.write(SNAPSHOT_KEY, &json));

        if let Err(err) = result {
            warn!(error = %err, "failed to persist cache snapshot");
        }
    }
}

fn build_store(config: &Config, domain: CacheDomain, clock: Arc<dyn Clock>) -> CacheStore {
    CacheStore::new(config.max_entries, config.ttl_for(domain), clock)
}

fn load_snapshot(storage: &dyn KeyValueStorage) -> Option<RegistrySnapshot> {
    let raw = match storage.read(SNAPSHOT_KEY) {
        Ok(raw) => raw?,
        Err(err) => {
            warn!(error = %err, "failed to read cache snapshot");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!(error = %err, "discarding unreadable cache snapshot");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn page(n: u32) -> RequestParams {
        RequestParams::new().with("page", n)
    }

    fn registry() -> (CacheRegistry, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        (CacheRegistry::new(&Config::default(), clock.clone()), clock)
    }

    #[test]
    fn test_domain_default_ttls() {
        assert_eq!(CacheDomain::Catalog.default_ttl(), Duration::from_secs(600));
        assert_eq!(CacheDomain::Discovery.default_ttl(), Duration::from_secs(3600));
        assert_eq!(CacheDomain::Person.default_ttl(), Duration::from_secs(1800));
        assert_eq!(CacheDomain::Search.default_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_domain_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&CacheDomain::Discovery).unwrap(), "\"discovery\"");
        assert_eq!(CacheDomain::Person.to_string(), "person");
    }

    #[tokio::test]
    async fn test_domain_isolation() {
        let (registry, _) = registry();

        registry
            .set(CacheDomain::Search, "/search/movie", &page(1), json!("search"))
            .await;

        assert_eq!(
            registry.get(CacheDomain::Catalog, "/search/movie", &page(1)).await,
            None
        );
        assert_eq!(
            registry.get(CacheDomain::Search, "/search/movie", &page(1)).await,
            Some(json!("search"))
        );
    }

    #[tokio::test]
    async fn test_domains_expire_independently() {
        let (registry, clock) = registry();

        registry.set(CacheDomain::Search, "/x", &page(1), json!(1)).await;
        registry.set(CacheDomain::Discovery, "/x", &page(1), json!(2)).await;

        clock.advance(Duration::from_secs(5 * 60));

        assert_eq!(registry.get(CacheDomain::Search, "/x", &page(1)).await, None);
        assert_eq!(
            registry.get(CacheDomain::Discovery, "/x", &page(1)).await,
            Some(json!(2))
        );
    }

    #[tokio::test]
    async fn test_clear_expired_sweeps_all_domains() {
        let (registry, clock) = registry();

        for domain in CacheDomain::ALL {
            registry.set(domain, "/x", &page(1), json!(1)).await;
        }

        // Past catalog (10m) and search (5m), inside person (30m) and discovery (60m)
        clock.advance(Duration::from_secs(15 * 60));

        assert_eq!(registry.clear_expired().await, 2);
        assert_eq!(registry.len(CacheDomain::Catalog).await, 0);
        assert_eq!(registry.len(CacheDomain::Search).await, 0);
        assert_eq!(registry.len(CacheDomain::Person).await, 1);
        assert_eq!(registry.len(CacheDomain::Discovery).await, 1);
    }

    #[tokio::test]
    async fn test_clear_single_domain() {
        let (registry, _) = registry();

        registry.set(CacheDomain::Catalog, "/x", &page(1), json!(1)).await;
        registry.set(CacheDomain::Person, "/x", &page(1), json!(1)).await;

        registry.clear(CacheDomain::Catalog).await;

        assert_eq!(registry.len(CacheDomain::Catalog).await, 0);
        assert_eq!(registry.len(CacheDomain::Person).await, 1);
    }

    #[tokio::test]
    async fn test_persisted_snapshot_restores() {
        let clock = Arc::new(ManualClock::new(0));
        let storage = Arc::new(MemoryStorage::new());
        let config = Config::default();

        let registry = CacheRegistry::restore(&config, clock.clone(), storage.clone());
        registry
            .set(CacheDomain::Catalog, "/movie/popular", &page(1), json!({"page": 1}))
            .await;

        let raw = storage.read(SNAPSHOT_KEY).unwrap().unwrap();
        let snapshot: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(snapshot["catalog"][0][0], "/movie/popular?page=1");

        let reloaded = CacheRegistry::restore(&config, clock, storage);
        assert_eq!(
            reloaded.get(CacheDomain::Catalog, "/movie/popular", &page(1)).await,
            Some(json!({"page": 1}))
        );
    }

    #[tokio::test]
    async fn test_clear_rewrites_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let config = Config::default();
        let registry = CacheRegistry::restore(&config, Arc::new(ManualClock::new(0)), storage.clone());

        registry.set(CacheDomain::Catalog, "/x", &page(1), json!(1)).await;
        registry.clear(CacheDomain::Catalog).await;

        let reloaded = CacheRegistry::restore(&config, Arc::new(ManualClock::new(0)), storage.clone());
        assert_eq!(reloaded.len(CacheDomain::Catalog).await, 0);

        registry.set(CacheDomain::Person, "/x", &page(1), json!(1)).await;
        registry.clear_all().await;
        assert!(storage.read(SNAPSHOT_KEY).unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_sets_persist_latest_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let registry = Arc::new(CacheRegistry::restore(
            &Config::default(),
            Arc::new(ManualClock::new(0)),
            storage.clone(),
        ));

        let handles: Vec<_> = (1..=32u32)
            .map(|n| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    registry
                        .set(CacheDomain::Search, "/search/movie", &page(n), json!(n))
                        .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let raw = storage.read(SNAPSHOT_KEY).unwrap().unwrap();
        let persisted: RegistrySnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted[&CacheDomain::Search].len(), 32);
        assert_eq!(persisted, registry.snapshot().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_clear_all_is_not_undone_by_pending_writes() {
        let storage = Arc::new(MemoryStorage::new());
        let registry = Arc::new(CacheRegistry::restore(
            &Config::default(),
            Arc::new(ManualClock::new(0)),
            storage.clone(),
        ));

        let writer = {
            let registry = registry.clone();
            tokio::spawn(async move {
                for n in 1..=16u32 {
                    registry.set(CacheDomain::Catalog, "/movie/popular", &page(n), json!(n)).await;
                }
            })
        };
        registry.clear_all().await;
        writer.await.unwrap();

        // Whatever survived in memory is exactly what storage holds
        let in_memory = registry.snapshot().await;
        let persisted: RegistrySnapshot = match storage.read(SNAPSHOT_KEY).unwrap() {
            Some(raw) => serde_json::from_str(&raw).unwrap(),
            None => RegistrySnapshot::new(),
        };
        let entries = |snapshot: &RegistrySnapshot| {
            snapshot.values().map(Vec::len).sum::<usize>()
        };
        assert_eq!(entries(&persisted), entries(&in_memory));
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_memory_cache() {
        let storage = Arc::new(MemoryStorage::with_quota(8));
        let registry =
            CacheRegistry::restore(&Config::default(), Arc::new(ManualClock::new(0)), storage.clone());

        registry
            .set(CacheDomain::Catalog, "/movie/popular", &page(1), json!({"results": []}))
            .await;

        assert!(storage.read(SNAPSHOT_KEY).unwrap().is_none());
        assert_eq!(
            registry.get(CacheDomain::Catalog, "/movie/popular", &page(1)).await,
            Some(json!({"results": []}))
        );
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(SNAPSHOT_KEY, "not json").unwrap();

        let registry =
            CacheRegistry::restore(&Config::default(), Arc::new(ManualClock::new(0)), storage);

        for domain in CacheDomain::ALL {
            assert_eq!(registry.len(domain).await, 0);
        }
    }
}
