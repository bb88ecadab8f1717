//! Configuration Module
//!
//! Loads the API credential, endpoint, cache policy and storage location from
//! environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheDomain;

/// Credential substituted when `TMDB_API_KEY` is unset.
pub const FALLBACK_API_KEY: &str = "movie-catalog-demo-key";

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

pub const DEFAULT_LANGUAGE: &str = "es-ES";

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Credential sent as the `api_key` query parameter
    pub api_key: String,
    /// Base URL every endpoint path is appended to
    pub base_url: String,
    /// Default `language` parameter for every request
    pub language: String,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Maximum entries per cache domain
    pub max_entries: usize,
    /// TTL in seconds for catalog data (titles, credits, videos)
    pub catalog_ttl: u64,
    /// TTL in seconds for genre and discovery listings
    pub discovery_ttl: u64,
    /// TTL in seconds for person profiles, credits and images
    pub person_ttl: u64,
    /// TTL in seconds for search results
    pub search_ttl: u64,
    /// Interval in seconds between expired-entry sweeps
    pub sweep_interval: u64,
    /// Directory holding favorites and the cache snapshot
    pub storage_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TMDB_API_KEY` - API credential (default: built-in fallback, logged)
    /// - `TMDB_BASE_URL` - API base URL (default: https://api.themoviedb.org/3)
    /// - `TMDB_LANGUAGE` - Response language (default: es-ES)
    /// - `REQUEST_TIMEOUT_SECS` - Request timeout (default: 10)
    /// - `CACHE_MAX_ENTRIES` - Entries per cache domain (default: 100)
    /// - `CATALOG_TTL_SECS` - Catalog TTL (default: 600)
    /// - `DISCOVERY_TTL_SECS` - Genre/discovery TTL (default: 3600)
    /// - `PERSON_TTL_SECS` - Person TTL (default: 1800)
    /// - `SEARCH_TTL_SECS` - Search TTL (default: 300)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency (default: 60)
    /// - `STORAGE_DIR` - Local storage directory (default: .movie_catalog_cache)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = match env::var("TMDB_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                warn!("TMDB_API_KEY is not set, using the built-in fallback credential");
                FALLBACK_API_KEY.to_string()
            }
        };

        Self {
            api_key,
            base_url: env::var("TMDB_BASE_URL").unwrap_or(defaults.base_url),
            language: env::var("TMDB_LANGUAGE").unwrap_or(defaults.language),
            request_timeout: parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            max_entries: parse_env("CACHE_MAX_ENTRIES", defaults.max_entries),
            catalog_ttl: parse_env("CATALOG_TTL_SECS", defaults.catalog_ttl),
            discovery_ttl: parse_env("DISCOVERY_TTL_SECS", defaults.discovery_ttl),
            person_ttl: parse_env("PERSON_TTL_SECS", defaults.person_ttl),
            search_ttl: parse_env("SEARCH_TTL_SECS", defaults.search_ttl),
            sweep_interval: parse_env("SWEEP_INTERVAL_SECS", defaults.sweep_interval),
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
        }
    }

    /// Returns the TTL configured for a cache domain.
    pub fn ttl_for(&self, domain: CacheDomain) -> Duration {
        let secs = match domain {
            CacheDomain::Catalog => self.catalog_ttl,
            CacheDomain::Discovery => self.discovery_ttl,
            CacheDomain::Person => self.person_ttl,
            CacheDomain::Search => self.search_ttl,
        };
        Duration::from_secs(secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: FALLBACK_API_KEY.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            request_timeout: 10,
            max_entries: 100,
            catalog_ttl: CacheDomain::Catalog.default_ttl().as_secs(),
            discovery_ttl: CacheDomain::Discovery.default_ttl().as_secs(),
            person_ttl: CacheDomain::Person.default_ttl().as_secs(),
            search_ttl: CacheDomain::Search.default_ttl().as_secs(),
            sweep_interval: 60,
            storage_dir: PathBuf::from(".movie_catalog_cache"),
        }
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
