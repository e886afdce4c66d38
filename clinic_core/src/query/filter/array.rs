//! Array comparison logic for predicates

use serde_json::Value;

use super::coerce::{loose_eq, to_number};
use super::types::Operator;

/// Compare a field against an array predicate.
///
/// A field that is not an array is treated as an empty one. A predicate value
/// that is not an array is treated as a single-element one.
pub fn compare_array(field_value: &Value, operator: &Operator, filter_value: &Value) -> bool {
    let items: &[Value] = match field_value {
        Value::Array(items) => items,
        _ => &[],
    };
    let wanted: &[Value] = match filter_value {
        Value::Array(values) => values,
        single => std::slice::from_ref(single),
    };
    let has = |candidate: &Value| items.iter().any(|item| loose_eq(item, candidate));

    match operator {
        Operator::Contains | Operator::ContainsAny => wanted.iter().any(has),
        Operator::NotContains => !wanted.iter().any(has),
        Operator::ContainsAll => wanted.iter().all(has),
        Operator::IsEmpty => items.is_empty(),
        Operator::IsNotEmpty => !items.is_empty(),
        Operator::LengthEquals => compare_length(items.len(), filter_value, |len, n| len == n),
        Operator::LengthGreater => compare_length(items.len(), filter_value, |len, n| len > n),
        Operator::LengthLess => compare_length(items.len(), filter_value, |len, n| len < n),
        _ => false,
    }
}

fn compare_length(len: usize, filter_value: &Value, compare: impl Fn(f64, f64) -> bool) -> bool {
    let n = to_number(filter_value);
    !n.is_nan() && compare(len as f64, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn arr(field: Value, op: Operator, filter: Value) -> bool {
        compare_array(&field, &op, &filter)
    }

    #[test]
    fn test_contains_single_value() {
        assert!(arr(json!(["bte", "ric"]), Operator::Contains, json!("ric")));
        assert!(!arr(json!(["bte", "ric"]), Operator::Contains, json!("cic")));
        assert!(arr(json!(["bte", "ric"]), Operator::NotContains, json!("cic")));
    }

    #[test]
    fn test_contains_is_case_sensitive_membership() {
        assert!(!arr(json!(["BTE"]), Operator::Contains, json!("bte")));
    }

    #[test]
    fn test_contains_any_of_several() {
        assert!(arr(json!(["a", "b"]), Operator::Contains, json!(["x", "b"])));
        assert!(arr(json!(["a", "b"]), Operator::ContainsAny, json!(["x", "b"])));
        assert!(!arr(json!(["a", "b"]), Operator::ContainsAny, json!(["x", "y"])));
        assert!(!arr(json!(["a", "b"]), Operator::NotContains, json!(["x", "b"])));
    }

    #[test]
    fn test_contains_all() {
        assert!(arr(json!(["a", "b", "c"]), Operator::ContainsAll, json!(["a", "b"])));
        assert!(!arr(json!(["a", "b", "c"]), Operator::ContainsAll, json!(["a", "d"])));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(arr(json!([1, 2, 3]), Operator::Contains, json!(2.0)));
        assert!(!arr(json!([1, 2, 3]), Operator::Contains, json!("2")));
    }

    #[test]
    fn test_non_array_field_is_empty() {
        assert!(arr(json!("tag"), Operator::IsEmpty, Value::Null));
        assert!(!arr(json!("tag"), Operator::Contains, json!("tag")));
        assert!(arr(json!([]), Operator::IsEmpty, Value::Null));
        assert!(arr(json!([1]), Operator::IsNotEmpty, Value::Null));
    }

    #[test]
    fn test_length_operators() {
        let visits = json!([{"id": 1}, {"id": 2}]);
        assert!(arr(visits.clone(), Operator::LengthEquals, json!(2)));
        assert!(arr(visits.clone(), Operator::LengthEquals, json!("2")));
        assert!(arr(visits.clone(), Operator::LengthGreater, json!(1)));
        assert!(!arr(visits.clone(), Operator::LengthGreater, json!(2)));
        assert!(arr(visits.clone(), Operator::LengthLess, json!(3)));
        assert!(!arr(visits, Operator::LengthLess, json!("many")));
    }

    #[test]
    fn test_unsupported_operator() {
        assert!(!arr(json!(["a"]), Operator::Equals, json!(["a"])));
    }
}
