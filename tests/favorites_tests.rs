//! Integration Tests for Favorites
//!
//! Exercises the favorites store against file-backed storage, reloading from
//! disk the way a new session would.

use std::sync::Arc;

use movie_catalog_cache::favorites::{MOVIES_KEY, PEOPLE_KEY};
use movie_catalog_cache::models::{MovieSummary, PersonSummary, TvSummary};
use movie_catalog_cache::storage::{FileStorage, KeyValueStorage};
use movie_catalog_cache::FavoritesStore;
use serde_json::{json, Value};
use tempfile::tempdir;

fn movie(id: u64, title: &str) -> MovieSummary {
    serde_json::from_value(json!({"id": id, "title": title, "vote_average": 7.5})).unwrap()
}

fn series(id: u64, name: &str) -> TvSummary {
    serde_json::from_value(json!({"id": id, "name": name})).unwrap()
}

fn person(id: u64, name: &str) -> PersonSummary {
    serde_json::from_value(json!({"id": id, "name": name})).unwrap()
}

#[test]
fn test_duplicate_add_keeps_first_timestamp_across_sessions() {
    let dir = tempdir().unwrap();
    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());

    let mut favorites = FavoritesStore::load(storage.clone());
    assert!(favorites.movies.add(movie(129, "El viaje de Chihiro"), None).unwrap());
    let first_added_at = favorites.movies.get(129).unwrap().added_at;

    let mut next_session = FavoritesStore::load(storage);
    assert!(!next_session
        .movies
        .add(movie(129, "El viaje de Chihiro"), Some("again".into()))
        .unwrap());

    assert_eq!(next_session.movies.len(), 1);
    let record = next_session.movies.get(129).unwrap();
    assert_eq!(record.added_at, first_added_at);
    assert!(record.note.is_none());
}

#[test]
fn test_each_collection_has_its_own_key() {
    let dir = tempdir().unwrap();
    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());

    let mut favorites = FavoritesStore::load(storage.clone());
    favorites.movies.add(movie(1, "Roma"), Some("ver otra vez".into())).unwrap();
    favorites.series.add(series(2, "Élite"), None).unwrap();
    favorites.people.add(person(3, "Guillermo del Toro"), None).unwrap();

    let movies: Value = serde_json::from_str(&storage.read(MOVIES_KEY).unwrap().unwrap()).unwrap();
    let people: Value = serde_json::from_str(&storage.read(PEOPLE_KEY).unwrap().unwrap()).unwrap();

    assert_eq!(movies.as_array().unwrap().len(), 1);
    assert_eq!(movies[0]["title"], "Roma");
    assert_eq!(movies[0]["note"], "ver otra vez");
    assert_eq!(people[0]["name"], "Guillermo del Toro");
    assert_eq!(FavoritesStore::load(storage).total(), 3);
}

#[test]
fn test_remove_and_clear_persist() {
    let dir = tempdir().unwrap();
    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());

    let mut favorites = FavoritesStore::load(storage.clone());
    favorites.series.add(series(1, "Dark"), None).unwrap();
    favorites.series.add(series(2, "Mindhunter"), None).unwrap();
    favorites.people.add(person(3, "Rosalía"), None).unwrap();

    favorites.series.remove(1).unwrap();
    favorites.people.clear().unwrap();

    let reloaded = FavoritesStore::load(storage);
    assert!(!reloaded.series.contains(1));
    assert!(reloaded.series.contains(2));
    assert!(reloaded.people.is_empty());
}
