//! Redis cache backend implementation.
//!
//! Provides a distributed cache using Redis for multi-instance deployments,
//! so every instance observes the same invalidations.

mod cache;
mod error;

pub use cache::RedisCache;
