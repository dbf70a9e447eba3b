//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `Store` trait defined
//! in `fleetsync_core::storage`, and the cached repository that sits in front
//! of them. The backend used by the server is selected at compile time via
//! feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): process-local tables behind a single lock
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time. The in-memory store is also compiled for tests, which
//! use it regardless of the selected backend.
//!
//! # Examples
//!
//! Build with the in-memory store (default):
//! ```bash
//! cargo build -p fleetsync
//! ```
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p fleetsync --no-default-features --features sqlite,memory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p fleetsync --features sqlite"
);

pub mod cached;
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::CachedRepository;
#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
