//! Cached repository decorator.
//!
//! [`CachedRepository`] wraps any `Store<T>` with the cache-aside pattern:
//!
//! - **Reads**: Check cache first, on miss fetch from the store and populate cache
//! - **Writes**: Persist to the store, then invalidate affected cache entries
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(SqliteStore::new("fleetsync.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000));
//!
//! let fleets: CachedRepository<Fleet, _, _> =
//!     CachedRepository::new(store, cache, Duration::from_secs(300));
//! ```

mod repository;

pub use repository::CachedRepository;
