//! Cache Store Module
//!
//! TTL store for one cache domain: HashMap storage, write-order tracking for
//! capacity eviction, and lazy expiry on read.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::{cache_key, CacheEntry, CacheStats, Clock, RequestParams, WriteOrder};

// == Cache Store ==
/// Bounded store of API responses sharing one TTL.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Write order, oldest at the back
    order: WriteOrder,
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Lifetime of every entry in this store
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the store can hold
    /// * `ttl` - Lifetime of each entry from the moment it is written
    /// * `clock` - Time source for `stored_at`/`expires_at`
    pub fn new(max_entries: usize, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: WriteOrder::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl,
            clock,
        }
    }

    // == Get ==
    /// Looks up the payload stored for `endpoint` and `params`.
    ///
    /// Returns `None` on a miss. An expired entry is removed and counted as a
    /// miss.
    pub fn get(&mut self, endpoint: &str, params: &RequestParams) -> Option<Value> {
        self.get_key(&cache_key(endpoint, params))
    }

    /// Looks up a payload by an already derived key.
    pub fn get_key(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.order.remove(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "cache entry expired");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.payload.clone())
    }

    // == Set ==
    /// Stores `payload` for `endpoint` and `params`.
    ///
    /// Overwriting an existing key replaces the payload and restarts its TTL.
    /// Inserting a new key into a full store first evicts the entry with the
    /// oldest write.
    pub fn set(&mut self, endpoint: &str, params: &RequestParams, payload: Value) {
        self.set_key(cache_key(endpoint, params), payload);
    }

    /// Stores a payload under an already derived key.
    pub fn set_key(&mut self, key: String, payload: Value) {
        let entry = CacheEntry::new(payload, self.clock.now_ms(), self.ttl);
        self.insert_entry(key, entry);
    }

    fn insert_entry(&mut self, key: String, entry: CacheEntry) {
        if self.max_entries == 0 {
            return;
        }

        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.order.evict_oldest() {
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
                debug!(key = %evicted_key, "evicted oldest cache entry");
            }
        }

        self.order.record_write(&key);
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Clear Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub fn clear_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.order.remove(&key);
        }

        self.stats.record_expirations(count);
        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Snapshot ==
    /// Copies out all entries, oldest write first.
    pub fn snapshot(&self) -> Vec<(String, CacheEntry)> {
        self.order
            .iter_oldest_first()
            .filter_map(|key| {
                self.entries
                    .get(key)
                    .map(|entry| (key.clone(), entry.clone()))
            })
            .collect()
    }

    // == Restore ==
    /// Loads entries from a snapshot, keeping their original timestamps.
    ///
    /// Expired entries are skipped. Entries are inserted in `stored_at` order
    /// so capacity eviction keeps the newest ones. Returns how many entries
    /// were loaded.
    pub fn restore(&mut self, mut entries: Vec<(String, CacheEntry)>) -> usize {
        let now = self.clock.now_ms();
        entries.retain(|(_, entry)| !entry.is_expired(now));
        entries.sort_by_key(|(_, entry)| entry.stored_at);

        for (key, entry) in entries {
            self.insert_entry(key, entry);
        }

        self.entries.len()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries, expired ones included until
    /// they are read or swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Returns the `stored_at` of the oldest entry, if any.
    pub fn oldest_stored_at(&self) -> Option<u64> {
        self.order
            .peek_oldest()
            .and_then(|key| self.entries.get(key))
            .map(|entry| entry.stored_at)
    }
}
