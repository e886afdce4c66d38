//! Predicate types and matching logic

mod array;
mod boolean;
mod coerce;
mod date;
mod number;
mod text;
mod types;

pub use coerce::{stringify, to_number, truthy};
pub use types::*;

use chrono::{DateTime, Utc};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PredicateError;
use crate::record::{Record, instant_from_value};

/// One advanced filter row: a field, an operator and a comparison value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Predicate {
    pub id: String,
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_operator: Option<LogicalOperator>,
}

impl Predicate {
    pub fn new(
        id: impl Into<String>,
        field: impl Into<String>,
        data_type: DataType,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            id: id.into(),
            field: field.into(),
            operator,
            value: value.into(),
            data_type,
            logical_operator: None,
        }
    }

    pub fn with_logical_operator(mut self, logical_operator: LogicalOperator) -> Self {
        self.logical_operator = Some(logical_operator);
        self
    }

    /// Untagged predicates belong to the AND group.
    pub fn is_or(&self) -> bool {
        self.logical_operator == Some(LogicalOperator::Or)
    }

    /// Check if a record matches, with relative dates measured from the clock.
    pub fn evaluate(&self, record: &Record) -> bool {
        self.evaluate_at(record, Utc::now())
    }

    /// Check if a record matches, with relative dates measured from `now`.
    ///
    /// Never fails: anything malformed is a non-match. A missing field only
    /// matches `is_null` and `is_empty`, whatever the data type.
    pub fn evaluate_at(&self, record: &Record, now: DateTime<Utc>) -> bool {
        let field_value = match record.resolve(&self.field) {
            Some(value) => value,
            None => return matches!(self.operator, Operator::IsNull | Operator::IsEmpty),
        };

        match self.data_type {
            DataType::Text => text::compare_text(&field_value, &self.operator, &self.value),
            DataType::Number => number::compare_number(&field_value, &self.operator, &self.value),
            DataType::Date => date::compare_date(&field_value, &self.operator, &self.value, now),
            DataType::Array => array::compare_array(&field_value, &self.operator, &self.value),
            DataType::Boolean => boolean::compare_boolean(&field_value, &self.operator),
            DataType::Unsupported => false,
        }
    }

    /// Check that the operator belongs to the data type and that the value
    /// has the shape the operator needs. Evaluation does not depend on this.
    pub fn validate(&self) -> Result<(), PredicateError> {
        if self.data_type == DataType::Unsupported {
            return Err(PredicateError::UnknownDataType(self.data_type.to_string()));
        }
        if !self.data_type.supports(self.operator) {
            return Err(PredicateError::UnsupportedOperator {
                data_type: self.data_type.to_string(),
                operator: self.operator.to_string(),
                supported: self
                    .data_type
                    .operators()
                    .iter()
                    .map(|op| op.to_string())
                    .collect(),
            });
        }

        let valid = match (self.data_type, self.operator) {
            (DataType::Text, Operator::Regex) => {
                let pattern = stringify(&self.value);
                return RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|_| ())
                    .map_err(|e| PredicateError::InvalidPattern {
                        pattern,
                        reason: e.to_string(),
                    });
            }
            (DataType::Number, Operator::Between | Operator::NotBetween) => {
                number::numeric_range(&self.value).is_some()
            }
            (
                DataType::Number,
                Operator::Equals
                | Operator::NotEquals
                | Operator::GreaterThan
                | Operator::GreaterThanEqual
                | Operator::LessThan
                | Operator::LessThanEqual,
            ) => !to_number(&self.value).is_nan(),
            (DataType::Date, Operator::Equals | Operator::NotEquals | Operator::Before | Operator::After) => {
                instant_from_value(&self.value).is_some()
            }
            (DataType::Date, Operator::Between) => date::date_range(&self.value).is_some(),
            (DataType::Date, Operator::LastDays | Operator::NextDays) => {
                coerce::to_count(&self.value).is_some()
            }
            (
                DataType::Array,
                Operator::LengthEquals | Operator::LengthGreater | Operator::LengthLess,
            ) => !to_number(&self.value).is_nan(),
            _ => true,
        };

        if valid {
            Ok(())
        } else {
            Err(PredicateError::InvalidOperand {
                operator: self.operator.to_string(),
                expected: expected_operand(self.data_type, self.operator),
                found: stringify(&self.value),
            })
        }
    }
}

fn expected_operand(data_type: DataType, operator: Operator) -> &'static str {
    match (data_type, operator) {
        (DataType::Number, Operator::Between | Operator::NotBetween) => "two numbers as \"min,max\"",
        (DataType::Date, Operator::Between) => "two dates as \"start,end\"",
        (DataType::Date, Operator::LastDays | Operator::NextDays) => "a whole number of days",
        (DataType::Date, _) => "a date",
        _ => "a number",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::try_from(value).unwrap()
    }

    #[test]
    fn test_missing_field_short_circuit_for_every_type() {
        let r = record(json!({"name": "Alice"}));
        for data_type in [
            DataType::Text,
            DataType::Number,
            DataType::Date,
            DataType::Boolean,
            DataType::Array,
            DataType::Unsupported,
        ] {
            for operator in [
                Operator::IsNull,
                Operator::IsEmpty,
                Operator::IsNotNull,
                Operator::IsNotEmpty,
                Operator::Equals,
                Operator::Contains,
            ] {
                let p = Predicate::new("p", "notes", data_type, operator, json!(""));
                let expected = matches!(operator, Operator::IsNull | Operator::IsEmpty);
                assert_eq!(p.evaluate(&r), expected, "{:?} {:?}", data_type, operator);
            }
        }
    }

    #[test]
    fn test_null_field_counts_as_missing() {
        let r = record(json!({"notes": null}));
        let p = Predicate::new("p", "notes", DataType::Text, Operator::IsEmpty, Value::Null);
        assert!(p.evaluate(&r));
    }

    #[test]
    fn test_text_contains_case_insensitive() {
        let r = record(json!({"name": "Alice"}));
        let p = Predicate::new("p", "name", DataType::Text, Operator::Contains, "ALI");
        assert!(p.evaluate(&r));
    }

    #[test]
    fn test_nested_number_field() {
        let r = record(json!({"testDetails": {"testPrice": 1500}}));
        let p = Predicate::new("p", "testDetails.testPrice", DataType::Number, Operator::GreaterThan, 1000);
        assert!(p.evaluate(&r));
    }

    #[test]
    fn test_array_length_via_path() {
        let r = record(json!({"visits": [{}, {}, {}]}));
        let p = Predicate::new("p", "visits.length", DataType::Number, Operator::GreaterThanEqual, 3);
        assert!(p.evaluate(&r));
    }

    #[test]
    fn test_unsupported_data_type_never_matches() {
        let r = record(json!({"price": 10}));
        let p = Predicate::new("p", "price", DataType::Unsupported, Operator::Equals, 10);
        assert!(!p.evaluate(&r));
    }

    #[test]
    fn test_operator_not_registered_for_type_never_matches() {
        let r = record(json!({"name": "Alice"}));
        let p = Predicate::new("p", "name", DataType::Text, Operator::GreaterThan, "A");
        assert!(!p.evaluate(&r));
    }

    #[test]
    fn test_deserialize_wire_shape() {
        let p: Predicate = serde_json::from_value(json!({
            "id": "filter-1",
            "field": "status",
            "operator": "equals",
            "value": "open",
            "dataType": "text",
            "logicalOperator": "OR"
        }))
        .unwrap();
        assert_eq!(p.operator, Operator::Equals);
        assert_eq!(p.data_type, DataType::Text);
        assert!(p.is_or());
    }

    #[test]
    fn test_deserialize_defaults() {
        let p: Predicate = serde_json::from_value(json!({
            "id": "filter-2",
            "field": "notes",
            "operator": "is_empty",
            "dataType": "text"
        }))
        .unwrap();
        assert_eq!(p.value, Value::Null);
        assert_eq!(p.logical_operator, None);
        assert!(!p.is_or());
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert!(Predicate::new("p", "price", DataType::Number, Operator::Between, "10,20").validate().is_ok());
        assert!(Predicate::new("p", "name", DataType::Text, Operator::Regex, "^a").validate().is_ok());
        assert!(Predicate::new("p", "at", DataType::Date, Operator::LastDays, "30").validate().is_ok());
        assert!(Predicate::new("p", "at", DataType::Date, Operator::ThisMonth, Value::Null).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_operator_for_wrong_type() {
        let p = Predicate::new("p", "name", DataType::Text, Operator::GreaterThan, "a");
        assert_matches!(p.validate(), Err(PredicateError::UnsupportedOperator { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_regex() {
        let p = Predicate::new("p", "name", DataType::Text, Operator::Regex, "(unclosed");
        assert_matches!(p.validate(), Err(PredicateError::InvalidPattern { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_operands() {
        let bad = [
            Predicate::new("p", "price", DataType::Number, Operator::Between, "10"),
            Predicate::new("p", "price", DataType::Number, Operator::GreaterThan, "lots"),
            Predicate::new("p", "at", DataType::Date, Operator::Before, "someday"),
            Predicate::new("p", "at", DataType::Date, Operator::Between, "2024-01-01,never"),
            Predicate::new("p", "at", DataType::Date, Operator::NextDays, "1.5"),
            Predicate::new("p", "tags", DataType::Array, Operator::LengthLess, "few"),
        ];
        for p in bad {
            assert_matches!(p.validate(), Err(PredicateError::InvalidOperand { .. }));
        }
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        let p = Predicate::new("p", "x", DataType::Unsupported, Operator::Equals, 1);
        assert_matches!(p.validate(), Err(PredicateError::UnknownDataType(_)));
    }
}
