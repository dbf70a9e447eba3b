//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of the store trait
//! using `rusqlite` for synchronous operations and `tokio-rusqlite` for async
//! wrapping. Uniqueness, foreign keys and cascade deletes are enforced by the
//! schema.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::{SqlEntity, SqliteStore};
