use std::{env, time::Duration};

const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
#[cfg(any(feature = "memory", test))]
const DEFAULT_CACHE_MAX_ENTRIES: usize = 10_000;
#[cfg(feature = "sqlite")]
const DEFAULT_SQLITE_PATH: &str = "fleetsync.db";
#[cfg(feature = "redis")]
const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

/// Application configuration loaded from environment variables.
///
/// Backend-specific settings only exist when their backend is compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TTL applied to every cache entry.
    pub cache_ttl_seconds: u64,
    /// LRU capacity of the memory cache.
    #[cfg(any(feature = "memory", test))]
    pub cache_max_entries: usize,
    #[cfg(feature = "sqlite")]
    pub sqlite_path: String,
    #[cfg(feature = "redis")]
    pub redis_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `CACHE_TTL_SECONDS` (default: 300)
    /// - `CACHE_MAX_ENTRIES` (default: 10,000; `memory` cache)
    /// - `SQLITE_PATH` (default: "fleetsync.db"; `sqlite` storage)
    /// - `REDIS_URL` (default: "redis://localhost:6379"; `redis` cache)
    ///
    /// Unparseable numbers fall back to their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cache_ttl_seconds: lookup("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            #[cfg(any(feature = "memory", test))]
            cache_max_entries: lookup("CACHE_MAX_ENTRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
            #[cfg(feature = "sqlite")]
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_string()),
            #[cfg(feature = "redis")]
            redis_url: lookup("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_vars(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
        assert_eq!(config.cache_max_entries, 10_000);
        #[cfg(feature = "sqlite")]
        assert_eq!(config.sqlite_path, "fleetsync.db");
        #[cfg(feature = "redis")]
        assert_eq!(config.redis_url, "redis://localhost:6379");
    }

    #[test]
    fn test_values_are_read_from_variables() {
        let config = from_vars(&[("CACHE_TTL_SECONDS", "600"), ("CACHE_MAX_ENTRIES", "50")]);

        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
        assert_eq!(config.cache_max_entries, 50);
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = from_vars(&[("CACHE_TTL_SECONDS", "five minutes")]);
        assert_eq!(config, Config::default());
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_sqlite_path_override() {
        let config = from_vars(&[("SQLITE_PATH", "/tmp/fleet.db")]);
        assert_eq!(config.sqlite_path, "/tmp/fleet.db");
    }
}
