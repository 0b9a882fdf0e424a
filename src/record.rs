//! Passive DNS record view.
//!
//! A [`Record`] wraps one decoded `data` entry of a search response and exposes
//! typed, read-only accessors over it. Nothing is derived at construction time:
//! every accessor reads the underlying JSON on demand, so a missing field only
//! surfaces when something asks for it.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use crate::error_handling::RecordError;

const FIELD_QUERY: &str = "query";
const FIELD_ANSWER: &str = "answer";
const FIELD_RRTYPE: &str = "rrtype";
const FIELD_RRCLASS: &str = "rrclass";
const FIELD_FIRST_SEEN: &str = "firstSeenTimestamp";
const FIELD_LAST_SEEN: &str = "lastSeenTimestamp";
const FIELD_TIMES: &str = "times";
const FIELD_MIN_TTL: &str = "minTtl";
const FIELD_MAX_TTL: &str = "maxTtl";

/// One passive DNS observation as returned by the search API.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    entry: Map<String, Value>,
}

impl From<Map<String, Value>> for Record {
    fn from(entry: Map<String, Value>) -> Self {
        Self { entry }
    }
}

impl Record {
    /// Wraps a decoded response entry.
    pub fn new(entry: Map<String, Value>) -> Self {
        Self { entry }
    }

    /// The underlying decoded entry.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.entry
    }

    /// Raw field access.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::KeyNotFound` if the entry has no such field.
    pub fn get(&self, key: &str) -> Result<&Value, RecordError> {
        self.entry
            .get(key)
            .ok_or_else(|| RecordError::KeyNotFound(key.to_string()))
    }

    fn str_field(&self, key: &str) -> Result<&str, RecordError> {
        self.get(key)?.as_str().ok_or_else(|| RecordError::InvalidType {
            field: key.to_string(),
            expected: "string",
        })
    }

    fn int_field(&self, key: &str) -> Result<i64, RecordError> {
        self.get(key)?.as_i64().ok_or_else(|| RecordError::InvalidType {
            field: key.to_string(),
            expected: "integer",
        })
    }

    fn timestamp_field(&self, key: &str) -> Result<DateTime<Utc>, RecordError> {
        let ms = self.int_field(key)?;
        DateTime::from_timestamp_millis(ms).ok_or_else(|| RecordError::TimestampOutOfRange {
            field: key.to_string(),
            value: ms,
        })
    }

    /// The queried name.
    pub fn query(&self) -> Result<&str, RecordError> {
        self.str_field(FIELD_QUERY)
    }

    /// The observed answer.
    pub fn answer(&self) -> Result<&str, RecordError> {
        self.str_field(FIELD_ANSWER)
    }

    /// Resource record type, upper-cased (`A`, `MX`, ...).
    pub fn record_type(&self) -> Result<String, RecordError> {
        self.str_field(FIELD_RRTYPE).map(str::to_uppercase)
    }

    /// Resource record class, upper-cased (`IN`, ...).
    pub fn record_class(&self) -> Result<String, RecordError> {
        self.str_field(FIELD_RRCLASS).map(str::to_uppercase)
    }

    /// First observation as epoch milliseconds.
    pub fn first_seen_ms(&self) -> Result<i64, RecordError> {
        self.int_field(FIELD_FIRST_SEEN)
    }

    /// Last observation as epoch milliseconds.
    pub fn last_seen_ms(&self) -> Result<i64, RecordError> {
        self.int_field(FIELD_LAST_SEEN)
    }

    /// First observation as a UTC timestamp with millisecond precision.
    pub fn first_seen(&self) -> Result<DateTime<Utc>, RecordError> {
        self.timestamp_field(FIELD_FIRST_SEEN)
    }

    /// Last observation as a UTC timestamp with millisecond precision.
    pub fn last_seen(&self) -> Result<DateTime<Utc>, RecordError> {
        self.timestamp_field(FIELD_LAST_SEEN)
    }

    /// Number of times the pair was observed.
    pub fn times_seen(&self) -> Result<i64, RecordError> {
        self.int_field(FIELD_TIMES)
    }

    /// Observed TTL range as `(min, max)`.
    pub fn ttl(&self) -> Result<(i64, i64), RecordError> {
        Ok((
            self.int_field(FIELD_MIN_TTL)?,
            self.int_field(FIELD_MAX_TTL)?,
        ))
    }

    /// Compact form: `query, answer, TYPE, first_seen, last_seen, times_seen`.
    pub fn summary(&self) -> Result<String, RecordError> {
        Ok([
            self.query()?.to_string(),
            self.answer()?.to_string(),
            self.record_type()?,
            format_timestamp(&self.first_seen()?),
            format_timestamp(&self.last_seen()?),
            self.times_seen()?.to_string(),
        ]
        .join(", "))
    }

    /// Full form: `query answer TYPE first_seen last_seen CLASS times_seen (min, max)`.
    pub fn verbose(&self) -> Result<String, RecordError> {
        let (min_ttl, max_ttl) = self.ttl()?;
        Ok([
            self.query()?.to_string(),
            self.answer()?.to_string(),
            self.record_type()?,
            format_timestamp(&self.first_seen()?),
            format_timestamp(&self.last_seen()?),
            self.record_class()?,
            self.times_seen()?.to_string(),
            format!("({min_ttl}, {max_ttl})"),
        ]
        .join(" "))
    }

    /// Normalized JSON object with RFC 3339 timestamps and upper-cased type/class.
    pub fn to_json(&self) -> Result<Value, RecordError> {
        let (min_ttl, max_ttl) = self.ttl()?;
        Ok(json!({
            "query": self.query()?,
            "answer": self.answer()?,
            "rrtype": self.record_type()?,
            "rrclass": self.record_class()?,
            "first_seen": self.first_seen()?.to_rfc3339_opts(SecondsFormat::Millis, true),
            "last_seen": self.last_seen()?.to_rfc3339_opts(SecondsFormat::Millis, true),
            "times_seen": self.times_seen()?,
            "min_ttl": min_ttl,
            "max_ttl": max_ttl,
        }))
    }
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS`, adding `.ffffff` only when the
/// sub-second part is non-zero.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    if ts.timestamp_subsec_micros() == 0 {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}
