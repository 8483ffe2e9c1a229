//! Column codecs shared by the SQLite mappings.
//!
//! Ids are stored as hyphenated lowercase text so that `ORDER BY id` agrees with `Uuid`'s `Ord`.
//! Timestamps are RFC 3339 with nanoseconds, which round-trips `DateTime<Utc>` exactly.

use chrono::{DateTime, SecondsFormat, Utc};
use record_store::StoreError;
use rusqlite::types::Value;
use uuid::Uuid;

pub(crate) fn uuid_value(id: &Uuid) -> Value {
    Value::Text(id.hyphenated().to_string())
}

pub(crate) fn timestamp_value(at: &DateTime<Utc>) -> Value {
    Value::Text(at.to_rfc3339_opts(SecondsFormat::Nanos, true))
}

pub(crate) fn parse_uuid(raw: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(raw).map_err(|e| StoreError::Corrupt(format!("id {raw:?}: {e}")))
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("timestamp {raw:?}: {e}")))
}
