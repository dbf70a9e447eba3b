//! Core types and traits for fleetsync.
//!
//! Everything in this crate is free of I/O: domain types, the cache and
//! storage contracts, cache key naming, and the invalidation rules that tie
//! them together. Concrete backends live in the `fleetsync` binary crate.

pub mod cache;
pub mod fleet;
pub mod serde;
pub mod storage;
