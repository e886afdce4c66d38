//! Loose value coercions shared by the comparison modules

use serde_json::{Number, Value};

/// Render a value the way the list page displays it.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Numeric reading of a value; NaN when it has none. Blank strings are NaN.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            // Rust also parses `inf`, `infinity` and `nan`; only `Infinity` is a number here
            let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
            let spelled = unsigned.starts_with(|c: char| c.is_ascii_alphabetic());
            if s.is_empty() || (spelled && unsigned != "Infinity") {
                f64::NAN
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
        _ => f64::NAN,
    }
}

pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Equality where numbers compare by value (`1 == 1.0`).
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Split a range operand. Accepts `"a,b"` or a two-element array.
pub fn split_pair(value: &Value) -> Option<(Value, Value)> {
    match value {
        Value::String(s) => {
            let (low, high) = s.split_once(',')?;
            Some((
                Value::String(low.trim().to_string()),
                Value::String(high.trim().to_string()),
            ))
        }
        Value::Array(items) if items.len() == 2 => Some((items[0].clone(), items[1].clone())),
        _ => None,
    }
}

/// A whole, non-negative count such as a number of days.
pub fn to_count(value: &Value) -> Option<i64> {
    let n = to_number(value);
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 {
        Some(n as i64)
    } else {
        None
    }
}
