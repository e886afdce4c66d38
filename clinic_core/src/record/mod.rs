//! Schema-less records and dotted-path field resolution

mod timestamp;

pub use timestamp::{Timestamp, instant_from_value, parse_instant};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt;

/// A document as it was read from the store. No schema is enforced and any
/// field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style helper to set a top-level field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Get a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Resolve a dotted path against this record. See [`resolve`].
    pub fn resolve(&self, path: &str) -> Option<Cow<'_, Value>> {
        resolve(self, path)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Record {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(RecordError::NotARecord),
        }
    }
}

/// Errors raised while turning raw JSON into records.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordError {
    /// The export was not a JSON array
    NotAnArray,
    /// An element of the export was not a JSON object
    NotAnObject { index: usize },
    /// A single value was not a JSON object
    NotARecord,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotAnArray => write!(f, "Expected a JSON array of records"),
            RecordError::NotAnObject { index } => {
                write!(f, "Record at position {} is not a JSON object", index)
            }
            RecordError::NotARecord => write!(f, "Expected a JSON object for a record"),
        }
    }
}

impl std::error::Error for RecordError {}

/// Turns an exported JSON array into records, keeping their order.
pub fn load_records(value: Value) -> Result<Vec<Record>, RecordError> {
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(RecordError::NotAnArray),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(Record(map)),
            _ => Err(RecordError::NotAnObject { index }),
        })
        .collect()
}

/// Resolve a dot-separated path such as `testDetails.testPrice`.
///
/// Walking stops with `None` as soon as the current value is not an object.
/// Arrays only answer the `length` segment. A JSON `null` at the end of the
/// path counts as absent.
pub fn resolve<'a>(record: &'a Record, path: &str) -> Option<Cow<'a, Value>> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current: Cow<'a, Value> = Cow::Borrowed(record.0.get(first)?);

    for segment in segments {
        current = match current {
            Cow::Borrowed(Value::Object(map)) => Cow::Borrowed(map.get(segment)?),
            Cow::Borrowed(Value::Array(items)) if segment == "length" => {
                Cow::Owned(Value::from(items.len()))
            }
            _ => return None,
        };
    }

    if current.is_null() { None } else { Some(current) }
}
