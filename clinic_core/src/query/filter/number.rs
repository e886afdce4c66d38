//! Numeric comparison logic for predicates

use serde_json::Value;

use super::coerce::{split_pair, to_number};
use super::types::Operator;

/// Compare a field against a number predicate.
///
/// A field with no numeric reading only matches `is_null`. Operands that are
/// not numbers never match.
pub fn compare_number(field_value: &Value, operator: &Operator, filter_value: &Value) -> bool {
    let value = to_number(field_value);
    if value.is_nan() {
        return matches!(operator, Operator::IsNull);
    }

    match operator {
        Operator::Equals => with_operand(filter_value, |target| (value - target).abs() < f64::EPSILON),
        Operator::NotEquals => {
            with_operand(filter_value, |target| (value - target).abs() >= f64::EPSILON)
        }
        Operator::GreaterThan => with_operand(filter_value, |target| value > target),
        Operator::GreaterThanEqual => with_operand(filter_value, |target| value >= target),
        Operator::LessThan => with_operand(filter_value, |target| value < target),
        Operator::LessThanEqual => with_operand(filter_value, |target| value <= target),
        Operator::Between => {
            numeric_range(filter_value).is_some_and(|(min, max)| value >= min && value <= max)
        }
        Operator::NotBetween => {
            numeric_range(filter_value).is_some_and(|(min, max)| value < min || value > max)
        }
        Operator::IsNull => false,
        Operator::IsNotNull => true,
        _ => false,
    }
}

fn with_operand(filter_value: &Value, compare: impl Fn(f64) -> bool) -> bool {
    let target = to_number(filter_value);
    !target.is_nan() && compare(target)
}

/// Parse an inclusive `min,max` range.
pub(crate) fn numeric_range(filter_value: &Value) -> Option<(f64, f64)> {
    let (low, high) = split_pair(filter_value)?;
    let (min, max) = (to_number(&low), to_number(&high));
    if min.is_nan() || max.is_nan() { None } else { Some((min, max)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(field: Value, op: Operator, filter: Value) -> bool {
        compare_number(&field, &op, &filter)
    }

    #[test]
    fn test_equals_coerces_strings() {
        assert!(num(json!(500), Operator::Equals, json!("500")));
        assert!(num(json!("500"), Operator::Equals, json!(500)));
        assert!(!num(json!(500), Operator::Equals, json!(501)));
        assert!(num(json!(500), Operator::NotEquals, json!(501)));
    }

    #[test]
    fn test_ordering_operators() {
        assert!(num(json!(1500), Operator::GreaterThan, json!(1000)));
        assert!(!num(json!(500), Operator::GreaterThan, json!(1000)));
        assert!(num(json!(1000), Operator::GreaterThanEqual, json!(1000)));
        assert!(num(json!(999.5), Operator::LessThan, json!(1000)));
        assert!(num(json!(1000), Operator::LessThanEqual, json!("1000")));
    }

    #[test]
    fn test_spelled_out_infinity_is_not_a_number() {
        assert!(!num(json!("inf"), Operator::GreaterThan, json!(1000)));
        assert!(num(json!("inf"), Operator::IsNull, Value::Null));
        assert!(num(json!("Infinity"), Operator::GreaterThan, json!(1000)));
    }

    #[test]
    fn test_between_is_inclusive() {
        assert!(num(json!(10), Operator::Between, json!("10,20")));
        assert!(num(json!(20), Operator::Between, json!("10,20")));
        assert!(num(json!(15), Operator::Between, json!([10, 20])));
        assert!(!num(json!(9), Operator::Between, json!("10,20")));
        assert!(!num(json!(21), Operator::Between, json!("10,20")));
    }

    #[test]
    fn test_not_between() {
        assert!(num(json!(9), Operator::NotBetween, json!("10,20")));
        assert!(num(json!(21), Operator::NotBetween, json!("10,20")));
        assert!(!num(json!(10), Operator::NotBetween, json!("10,20")));
        assert!(!num(json!(20), Operator::NotBetween, json!("10,20")));
    }

    #[test]
    fn test_malformed_range_never_matches() {
        assert!(!num(json!(10), Operator::Between, json!("10")));
        assert!(!num(json!(10), Operator::Between, json!("low,high")));
        assert!(!num(json!(10), Operator::NotBetween, json!("a,b")));
    }

    #[test]
    fn test_non_numeric_operand_never_matches() {
        assert!(!num(json!(10), Operator::Equals, json!("ten")));
        assert!(!num(json!(10), Operator::NotEquals, json!("ten")));
        assert!(!num(json!(10), Operator::GreaterThan, json!(null)));
    }

    #[test]
    fn test_non_numeric_field_only_matches_is_null() {
        assert!(num(json!("n/a"), Operator::IsNull, json!(null)));
        assert!(!num(json!("n/a"), Operator::IsNotNull, json!(null)));
        assert!(!num(json!("n/a"), Operator::Equals, json!("n/a")));
    }

    #[test]
    fn test_null_checks_on_numbers() {
        assert!(!num(json!(0), Operator::IsNull, json!(null)));
        assert!(num(json!(0), Operator::IsNotNull, json!(null)));
    }

    #[test]
    fn test_unsupported_operator() {
        assert!(!num(json!(10), Operator::Contains, json!(1)));
    }
}
