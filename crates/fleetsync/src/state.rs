//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds one cached repository per entity type as a
//! trait object and supports different backend combinations via feature
//! flags.

use std::{sync::Arc, time::Duration};

use fleetsync_core::cache::Cache;
use fleetsync_core::fleet::{Driver, Fleet, Route, Vehicle};
use fleetsync_core::storage::{Repository, Store};

use crate::config::Config;
use crate::storage::CachedRepository;

/// Shared application state.
///
/// This is cloned for each request handler. Every repository wraps the same
/// store and the same cache.
#[derive(Clone)]
pub struct AppState {
    pub fleets: Arc<dyn Repository<Fleet>>,
    pub vehicles: Arc<dyn Repository<Vehicle>>,
    pub drivers: Arc<dyn Repository<Driver>>,
    pub routes: Arc<dyn Repository<Route>>,
}

impl AppState {
    /// Creates an AppState with a cached repository per entity type over a
    /// shared store and cache.
    fn build<S, C>(store: Arc<S>, cache: Arc<C>, ttl: Duration) -> Self
    where
        S: Store<Fleet> + Store<Vehicle> + Store<Driver> + Store<Route> + 'static,
        C: Cache + 'static,
    {
        Self {
            fleets: Arc::new(CachedRepository::<Fleet, _, _>::new(
                store.clone(),
                cache.clone(),
                ttl,
            )),
            vehicles: Arc::new(CachedRepository::<Vehicle, _, _>::new(
                store.clone(),
                cache.clone(),
                ttl,
            )),
            drivers: Arc::new(CachedRepository::<Driver, _, _>::new(
                store.clone(),
                cache.clone(),
                ttl,
            )),
            routes: Arc::new(CachedRepository::<Route, _, _>::new(store, cache, ttl)),
        }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteStore;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_store = Arc::new(SqliteStore::new(&config.sqlite_path).await?);
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::build(sqlite_store, memory_cache, config.cache_ttl()))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteStore;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_store = Arc::new(SqliteStore::new(&config.sqlite_path).await?);
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            Ok(Self::build(sqlite_store, redis_cache, config.cache_ttl()))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryStore;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for development without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_store = Arc::new(InMemoryStore::new());
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::build(inmemory_store, memory_cache, config.cache_ttl()))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::InMemoryStore;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let inmemory_store = Arc::new(InMemoryStore::new());
            let redis_cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            Ok(Self::build(inmemory_store, redis_cache, config.cache_ttl()))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(test)]
mod test_support {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryStore;

    impl Default for AppState {
        /// Creates an AppState with in-memory storage and cache for testing.
        ///
        /// This is only available in test builds and provides a simple way
        /// to create an AppState without external dependencies.
        fn default() -> Self {
            let config = Config::default();
            Self::build(
                Arc::new(InMemoryStore::new()),
                Arc::new(MemoryCache::new(config.cache_max_entries)),
                config.cache_ttl(),
            )
        }
    }
}
