//! Boolean comparison logic for predicates

use serde_json::Value;

use super::coerce::truthy;
use super::types::Operator;

/// Compare a present field against a boolean predicate using truthiness.
pub fn compare_boolean(field_value: &Value, operator: &Operator) -> bool {
    match operator {
        Operator::IsTrue => truthy(field_value),
        Operator::IsFalse => !truthy(field_value),
        Operator::IsNull => field_value.is_null(),
        _ => false,
    }
}
