//! Favorites Module
//!
//! Locally persisted lists of liked movies, series and people. Independent of
//! the gateway and its cache; nothing here expires or touches the network.

mod collection;

pub use collection::{FavoriteCollection, FavoriteRecord};

use std::sync::Arc;

use crate::models::{MovieSummary, PersonSummary, TvSummary};
use crate::storage::KeyValueStorage;

pub const MOVIES_KEY: &str = "favorites.movies";
pub const SERIES_KEY: &str = "favorites.series";
pub const PEOPLE_KEY: &str = "favorites.people";

// == Favorites Store ==
/// The three favorites collections, loaded once from storage.
pub struct FavoritesStore {
    pub movies: FavoriteCollection<MovieSummary>,
    pub series: FavoriteCollection<TvSummary>,
    pub people: FavoriteCollection<PersonSummary>,
}

impl FavoritesStore {
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            movies: FavoriteCollection::load(storage.clone(), MOVIES_KEY),
            series: FavoriteCollection::load(storage.clone(), SERIES_KEY),
            people: FavoriteCollection::load(storage, PEOPLE_KEY),
        }
    }

    /// Total records across all three collections.
    pub fn total(&self) -> usize {
        self.movies.len() + self.series.len() + self.people.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn movie(id: u64) -> MovieSummary {
        serde_json::from_value(serde_json::json!({"id": id, "title": format!("Movie {}", id)}))
            .unwrap()
    }

    fn series(id: u64) -> TvSummary {
        serde_json::from_value(serde_json::json!({"id": id, "name": format!("Series {}", id)}))
            .unwrap()
    }

    #[test]
    fn test_collections_are_independent() {
        let storage = Arc::new(MemoryStorage::new());
        let mut favorites = FavoritesStore::load(storage.clone());

        favorites.movies.add(movie(7), None).unwrap();
        favorites.series.add(series(7), None).unwrap();

        favorites.movies.remove(7).unwrap();

        assert!(!favorites.movies.contains(7));
        assert!(favorites.series.contains(7));
        assert!(!favorites.people.contains(7));
        assert_eq!(favorites.total(), 1);

        let reloaded = FavoritesStore::load(storage);
        assert!(reloaded.series.contains(7));
        assert!(reloaded.movies.is_empty());
    }
}
