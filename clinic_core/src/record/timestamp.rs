//! Timestamp shapes found in stored documents, normalised to one instant type

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// The shapes a date can take in a stored document.
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    /// Admin SDK export shape: `{ "_seconds": .., "_nanoseconds": .. }`
    Legacy { seconds: i64, nanos: u32 },
    /// Client SDK shape: `{ "seconds": .., "nanoseconds": .. }`
    Firestore { seconds: i64, nanos: u32 },
    /// A date string such as `2024-01-15` or an RFC 3339 timestamp
    Text(String),
    /// Milliseconds since the Unix epoch
    Millis(f64),
}

impl Timestamp {
    /// Recognise a timestamp shape. `_seconds` wins over `seconds`, which wins
    /// over a raw string or number.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                if let Some(seconds) = integer_field(map, "_seconds") {
                    let nanos = integer_field(map, "_nanoseconds").unwrap_or(0);
                    Some(Timestamp::Legacy { seconds, nanos: clamp_nanos(nanos) })
                } else if let Some(seconds) = integer_field(map, "seconds") {
                    let nanos = integer_field(map, "nanoseconds").unwrap_or(0);
                    Some(Timestamp::Firestore { seconds, nanos: clamp_nanos(nanos) })
                } else {
                    None
                }
            }
            Value::String(s) => Some(Timestamp::Text(s.clone())),
            Value::Number(n) => n.as_f64().map(Timestamp::Millis),
            _ => None,
        }
    }

    /// The instant this timestamp denotes, or `None` when it is not a valid date.
    pub fn to_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Legacy { seconds, nanos } | Timestamp::Firestore { seconds, nanos } => {
                DateTime::from_timestamp(*seconds, *nanos)
            }
            Timestamp::Text(s) => parse_instant(s),
            Timestamp::Millis(ms) => {
                if ms.is_finite() {
                    DateTime::from_timestamp_millis(ms.trunc() as i64)
                } else {
                    None
                }
            }
        }
    }
}

/// Shortcut for `Timestamp::from_value(value)?.to_instant()`.
pub fn instant_from_value(value: &Value) -> Option<DateTime<Utc>> {
    Timestamp::from_value(value)?.to_instant()
}

/// Parse a date string. Strings without an offset are read as UTC and a bare
/// date means midnight UTC.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn integer_field(map: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = map.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

fn clamp_nanos(nanos: i64) -> u32 {
    nanos.clamp(0, 999_999_999) as u32
}
