//! Lenient timestamp input.
//!
//! Clients send either RFC 3339 (`2025-01-01T09:00:00Z`,
//! `2025-01-01T09:00:00+02:00`) or a naive ISO datetime without an offset
//! (`2025-01-01T09:00:00`, `2025-01-01T09:00:00.250`). Naive values are read
//! as UTC. Output is always RFC 3339.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer};

use crate::types::Timestamp;

/// Accepted layout for timestamps without an offset.
pub const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse an RFC 3339 or naive ISO datetime.
pub fn parse(value: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(value, NAIVE_FORMAT).map(|n| n.and_utc()))
}

fn parse_field<E: de::Error>(value: &str) -> Result<Timestamp, E> {
    parse(value).map_err(|e| E::custom(format!("invalid datetime '{value}': {e}")))
}

/// `deserialize_with` target for `Option<Timestamp>`. Pair with
/// `#[serde(default)]`.
pub fn option<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.as_deref().map(parse_field::<D::Error>).transpose()
}

/// `deserialize_with` target for PATCH fields, see [`crate::nullable`].
pub fn nullable<'de, D>(deserializer: D) -> Result<Option<Option<Timestamp>>, D::Error>
where
    D: Deserializer<'de>,
{
    option(deserializer).map(Some)
}
