//! Movie Catalog Cache - application start
//!
//! Builds the shared cache and gateway once, restores persisted state, warms
//! the catalog and reports what it loaded.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_catalog_cache::cache::SystemClock;
use movie_catalog_cache::storage::FileStorage;
use movie_catalog_cache::{
    spawn_sweep_task, ApiGateway, CacheDomain, CacheRegistry, Config, FavoritesStore,
};

/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open local storage and restore the cache snapshot
/// 4. Build the gateway and start the expired-entry sweep
/// 5. Load favorites
/// 6. Warm the catalog: popular movies and the movie genre list
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_catalog_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Movie Catalog Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: base_url={}, language={}, max_entries={}, timeout={}s, sweep_interval={}s",
        config.base_url, config.language, config.max_entries, config.request_timeout, config.sweep_interval
    );

    let storage = Arc::new(
        FileStorage::open(&config.storage_dir)
            .with_context(|| format!("opening storage at {}", config.storage_dir.display()))?,
    );

    let registry = Arc::new(CacheRegistry::restore(
        &config,
        Arc::new(SystemClock),
        storage.clone(),
    ));
    let gateway = ApiGateway::new(&config, registry.clone()).context("building API gateway")?;

    let sweep_handle = spawn_sweep_task(registry.clone(), config.sweep_interval());
    info!("Background sweep task started");

    let favorites = FavoritesStore::load(storage);
    info!(
        "Favorites loaded: {} movies, {} series, {} people",
        favorites.movies.len(),
        favorites.series.len(),
        favorites.people.len()
    );

    match gateway.popular_movies(1).await {
        Ok(page) => info!(
            "Popular movies: {} results on page {} of {}",
            page.results.len(),
            page.page,
            page.total_pages
        ),
        Err(err) => warn!("Popular movies unavailable: {}", err),
    }

    match gateway.movie_genres().await {
        Ok(list) => info!("Movie genres: {}", list.genres.len()),
        Err(err) => warn!("Movie genres unavailable: {}", err),
    }

    for domain in CacheDomain::ALL {
        let stats = registry.stats(domain).await;
        info!(
            "Cache {}: entries={}, hits={}, misses={}",
            domain, stats.total_entries, stats.hits, stats.misses
        );
    }

    sweep_handle.abort();
    info!("Shutdown complete");
    Ok(())
}
