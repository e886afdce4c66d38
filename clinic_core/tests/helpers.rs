//! Shared test helpers for clinic_core tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use clinic_core::{Record, load_records};
use serde_json::Value;

/// Route engine debug logs to the test output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fixed clock for relative date operators.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

/// Load records from a JSON array literal.
pub fn records(value: Value) -> Vec<Record> {
    load_records(value).expect("Failed to load records")
}

/// The `name` of each record, in order.
pub fn names(records: &[&Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.get("name").and_then(|v| v.as_str()).unwrap_or("").to_string())
        .collect()
}
