//! Filter type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::query::PredicateError;

/// Logical operator tag on a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    #[serde(alias = "and")]
    And,
    #[serde(alias = "or")]
    Or,
}

/// Declared type of a filterable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Text,
    Number,
    Date,
    Boolean,
    Array,
    /// Any type name we do not know. Never matches.
    #[serde(other)]
    Unsupported,
}

const TEXT_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::Contains,
    Operator::NotContains,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::Regex,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
];

const NUMBER_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::GreaterThan,
    Operator::GreaterThanEqual,
    Operator::LessThan,
    Operator::LessThanEqual,
    Operator::Between,
    Operator::NotBetween,
    Operator::IsNull,
    Operator::IsNotNull,
];

const DATE_OPERATORS: &[Operator] = &[
    Operator::Equals,
    Operator::NotEquals,
    Operator::Before,
    Operator::After,
    Operator::Between,
    Operator::LastDays,
    Operator::NextDays,
    Operator::ThisMonth,
    Operator::LastMonth,
    Operator::ThisYear,
    Operator::IsNull,
    Operator::IsNotNull,
];

const ARRAY_OPERATORS: &[Operator] = &[
    Operator::Contains,
    Operator::NotContains,
    Operator::ContainsAll,
    Operator::ContainsAny,
    Operator::IsEmpty,
    Operator::IsNotEmpty,
    Operator::LengthEquals,
    Operator::LengthGreater,
    Operator::LengthLess,
];

const BOOLEAN_OPERATORS: &[Operator] = &[Operator::IsTrue, Operator::IsFalse, Operator::IsNull];

impl DataType {
    /// Operators registered for this type, in the order a builder offers them.
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            DataType::Text => TEXT_OPERATORS,
            DataType::Number => NUMBER_OPERATORS,
            DataType::Date => DATE_OPERATORS,
            DataType::Boolean => BOOLEAN_OPERATORS,
            DataType::Array => ARRAY_OPERATORS,
            DataType::Unsupported => &[],
        }
    }

    pub fn supports(&self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Date => "date",
            DataType::Boolean => "boolean",
            DataType::Array => "array",
            DataType::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(DataType::Text),
            "number" => Ok(DataType::Number),
            "date" => Ok(DataType::Date),
            "boolean" => Ok(DataType::Boolean),
            "array" => Ok(DataType::Array),
            other => Err(PredicateError::UnknownDataType(other.to_string())),
        }
    }
}

/// Comparison operators for predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Regex,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    Between,
    NotBetween,
    IsNull,
    IsNotNull,
    Before,
    After,
    LastDays,
    NextDays,
    ThisMonth,
    LastMonth,
    ThisYear,
    ContainsAll,
    ContainsAny,
    LengthEquals,
    LengthGreater,
    LengthLess,
    IsTrue,
    IsFalse,
    /// Any operator name we do not know. Never matches a present field.
    #[serde(other)]
    Unsupported,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::StartsWith => "starts_with",
            Operator::EndsWith => "ends_with",
            Operator::Regex => "regex",
            Operator::IsEmpty => "is_empty",
            Operator::IsNotEmpty => "is_not_empty",
            Operator::GreaterThan => "greater_than",
            Operator::GreaterThanEqual => "greater_than_equal",
            Operator::LessThan => "less_than",
            Operator::LessThanEqual => "less_than_equal",
            Operator::Between => "between",
            Operator::NotBetween => "not_between",
            Operator::IsNull => "is_null",
            Operator::IsNotNull => "is_not_null",
            Operator::Before => "before",
            Operator::After => "after",
            Operator::LastDays => "last_days",
            Operator::NextDays => "next_days",
            Operator::ThisMonth => "this_month",
            Operator::LastMonth => "last_month",
            Operator::ThisYear => "this_year",
            Operator::ContainsAll => "contains_all",
            Operator::ContainsAny => "contains_any",
            Operator::LengthEquals => "length_equals",
            Operator::LengthGreater => "length_greater",
            Operator::LengthLess => "length_less",
            Operator::IsTrue => "is_true",
            Operator::IsFalse => "is_false",
            Operator::Unsupported => "unsupported",
        }
    }

    /// Operators that take no comparison value.
    pub fn is_unary(&self) -> bool {
        matches!(
            self,
            Operator::IsEmpty
                | Operator::IsNotEmpty
                | Operator::IsNull
                | Operator::IsNotNull
                | Operator::ThisMonth
                | Operator::LastMonth
                | Operator::ThisYear
                | Operator::IsTrue
                | Operator::IsFalse
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        [
            TEXT_OPERATORS,
            NUMBER_OPERATORS,
            DATE_OPERATORS,
            ARRAY_OPERATORS,
            BOOLEAN_OPERATORS,
        ]
        .iter()
        .flat_map(|ops| ops.iter())
        .find(|op| op.as_str() == wanted)
        .copied()
        .ok_or(PredicateError::UnknownOperator(s.to_string()))
    }
}
