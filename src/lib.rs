//! Movie Catalog Cache - caching client for a movie metadata API
//!
//! Fetches listings, details, people and search results through a gateway
//! that caches responses per data domain with TTL expiry and bounded size,
//! and keeps locally persisted favorites.

pub mod cache;
pub mod config;
pub mod error;
pub mod favorites;
pub mod gateway;
pub mod models;
pub mod storage;
pub mod tasks;

pub use cache::{CacheDomain, CacheRegistry};
pub use config::Config;
pub use error::{ApiError, StorageError};
pub use favorites::FavoritesStore;
pub use gateway::ApiGateway;
pub use tasks::spawn_sweep_task;
