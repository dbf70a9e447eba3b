//! In-memory storage backend.
//!
//! Keeps all four tables behind a single `Arc<RwLock<_>>`, so each store call
//! is atomic with respect to every other call. Uniqueness, foreign-key and
//! cascade-delete rules mirror the SQLite schema. Useful for development and
//! for tests where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use fleetsync::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Use store for testing...
//! ```

mod repository;

pub use repository::{InMemoryEntity, InMemoryStore};
