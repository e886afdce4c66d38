//! Record ordering for the list view

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{Record, instant_from_value, parse_instant};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Sort by one field path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Stable sort of records by a field. Records without the field go last in
/// either direction.
pub fn sort_records(records: &mut [&Record], spec: &SortSpec) {
    records.sort_by(|a, b| compare_records_by_field(a, b, spec));
}

/// Compare two records by a specific field for sorting
pub fn compare_records_by_field(a: &Record, b: &Record, spec: &SortSpec) -> Ordering {
    let a_value = a.resolve(&spec.field);
    let b_value = b.resolve(&spec.field);

    match (a_value, b_value) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a_val), Some(b_val)) => {
            let ordering = compare_values(&a_val, &b_val);
            match spec.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    let (a, b) = (SortKey::of(a), SortKey::of(b));
    match (&a, &b) {
        (SortKey::Bool(a), SortKey::Bool(b)) => a.cmp(b),
        (SortKey::Number(a), SortKey::Number(b)) => {
            // NaN sorts after every number
            match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            }
        }
        (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        (SortKey::List(a), SortKey::List(b)) => {
            for (a_item, b_item) in a.iter().zip(b.iter()) {
                match compare_values(a_item, b_item) {
                    Ordering::Equal => continue,
                    other => return other,
                }
            }
            a.len().cmp(&b.len())
        }
        _ => a.rank().cmp(&b.rank()),
    }
}

/// What a value is compared as. Date strings and timestamp objects share one
/// group, so a field mixing shapes still sorts chronologically.
enum SortKey<'a> {
    Null,
    Bool(bool),
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
    List(&'a [Value]),
    Object,
}

impl<'a> SortKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => SortKey::Null,
            Value::Bool(b) => SortKey::Bool(*b),
            Value::Number(n) => SortKey::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => match parse_instant(s) {
                Some(instant) => SortKey::Date(instant),
                None => SortKey::Text(s.to_lowercase()),
            },
            Value::Array(items) => SortKey::List(items),
            Value::Object(_) => match instant_from_value(value) {
                Some(instant) => SortKey::Date(instant),
                None => SortKey::Object,
            },
        }
    }

    /// Order: Null < Boolean < Number < Date < String < Array < Object
    fn rank(&self) -> u8 {
        match self {
            SortKey::Null => 0,
            SortKey::Bool(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Date(_) => 3,
            SortKey::Text(_) => 4,
            SortKey::List(_) => 5,
            SortKey::Object => 6,
        }
    }
}
