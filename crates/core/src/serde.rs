//! Serde helper functions for request payloads.
//!
//! Timestamps arrive as RFC 3339 strings and are normalized to UTC. Clients
//! frequently send an empty string for a timestamp they leave unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

fn parse_timestamp<E: serde::de::Error>(s: &str) -> Result<DateTime<Utc>, E> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(E::custom)
}

/// Deserialize an optional RFC 3339 timestamp, treating empty strings as None.
pub fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_timestamp(&s).map(Some),
        _ => Ok(None),
    }
}

/// Deserialize a timestamp patch for partial updates.
///
/// Use with `#[serde(default)]`: an absent field stays `None` (unchanged),
/// `null` or an empty string becomes `Some(None)` (clear), and a timestamp
/// becomes `Some(Some(_))` (set).
pub fn deserialize_datetime_patch<'de, D>(
    deserializer: D,
) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_datetime(deserializer).map(Some)
}
