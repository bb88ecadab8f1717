//! Favorite Collection
//!
//! A list of liked catalog items, unique by id, written through to storage on
//! every change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::models::Identified;
use crate::storage::KeyValueStorage;

// == Favorite Record ==
/// A liked item with the time it was added and an optional note.
///
/// Serialized as the item's own fields plus `addedAt` and `note`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord<T> {
    #[serde(flatten)]
    pub item: T,
    pub added_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// == Favorite Collection ==
pub struct FavoriteCollection<T> {
    key: &'static str,
    records: Vec<FavoriteRecord<T>>,
    storage: Arc<dyn KeyValueStorage>,
}

impl<T> FavoriteCollection<T>
where
    T: Identified + Clone + Serialize + DeserializeOwned,
{
    /// Loads the collection stored under `key`.
    ///
    /// A missing key starts empty. An unreadable or corrupt collection is
    /// logged and also starts empty.
    pub fn load(storage: Arc<dyn KeyValueStorage>, key: &'static str) -> Self {
        let records: Vec<FavoriteRecord<T>> = match storage.read(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(key, error = %err, "discarding unreadable favorites");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(key, error = %err, "failed to read favorites");
                Vec::new()
            }
        };

        debug!(key, count = records.len(), "favorites loaded");
        Self {
            key,
            records,
            storage,
        }
    }

    // == Add ==
    /// Adds `item` unless an item with the same id is already present.
    ///
    /// Returns `true` if the item was added. An existing record keeps its
    /// original `added_at` and note.
    pub fn add(&mut self, item: T, note: Option<String>) -> Result<bool, StorageError> {
        if self.contains(item.id()) {
            return Ok(false);
        }

        let mut records = self.records.clone();
        records.push(FavoriteRecord {
            item,
            added_at: Utc::now(),
            note,
        });
        self.commit(records)?;
        Ok(true)
    }

    // == Remove ==
    /// Removes the item with `id`. Returns `true` if one was present.
    pub fn remove(&mut self, id: u64) -> Result<bool, StorageError> {
        if !self.contains(id) {
            return Ok(false);
        }

        let records = self
            .records
            .iter()
            .filter(|record| record.item.id() != id)
            .cloned()
            .collect();
        self.commit(records)?;
        Ok(true)
    }

    /// Replaces the note on an existing record. Returns `false` if `id` is absent.
    pub fn update_note(&mut self, id: u64, note: Option<String>) -> Result<bool, StorageError> {
        let Some(index) = self.records.iter().position(|r| r.item.id() == id) else {
            return Ok(false);
        };

        let mut records = self.records.clone();
        records[index].note = note;
        self.commit(records)?;
        Ok(true)
    }

    // == Clear ==
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.commit(Vec::new())
    }

    pub fn contains(&self, id: u64) -> bool {
        self.records.iter().any(|record| record.item.id() == id)
    }

    pub fn get(&self, id: u64) -> Option<&FavoriteRecord<T>> {
        self.records.iter().find(|record| record.item.id() == id)
    }

    /// Records in the order they were added.
    pub fn list(&self) -> &[FavoriteRecord<T>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes `records` to storage, then adopts them. On failure the
    /// collection is left as it was.
    fn commit(&mut self, records: Vec<FavoriteRecord<T>>) -> Result<(), StorageError> {
        let json = serde_json::to_string(&records)?;
        self.storage.write(self.key, &json)?;
        self.records = records;
        Ok(())
    }
}
