//! Error types for building predicates

use std::fmt;

/// Problems found while building or validating a predicate.
///
/// Evaluation never returns these: a malformed predicate simply does not
/// match. They surface when a predicate is built through
/// [`FilterBuilder`](super::FilterBuilder) or checked with
/// [`PredicateSet::validate`](super::PredicateSet::validate).
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateError {
    /// The field path is not in the catalog
    UnknownField(String),
    /// The data type name is not one we filter on
    UnknownDataType(String),
    /// The operator name is not one we know
    UnknownOperator(String),
    /// Operator is not registered for the data type
    UnsupportedOperator {
        data_type: String,
        operator: String,
        supported: Vec<String>,
    },
    /// A regex operand that does not compile
    InvalidPattern { pattern: String, reason: String },
    /// The comparison value does not have the shape the operator needs
    InvalidOperand {
        operator: String,
        expected: &'static str,
        found: String,
    },
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateError::UnknownField(path) => {
                write!(f, "Field '{}' cannot be filtered on", path)
            }
            PredicateError::UnknownDataType(name) => {
                write!(f, "Unknown data type '{}'", name)
            }
            PredicateError::UnknownOperator(name) => {
                write!(f, "Unknown operator '{}'", name)
            }
            PredicateError::UnsupportedOperator {
                data_type,
                operator,
                supported,
            } => {
                write!(
                    f,
                    "Cannot use '{}' operator on {} fields. Supported: {}",
                    operator,
                    data_type,
                    supported.join(", ")
                )
            }
            PredicateError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid pattern '{}': {}", pattern, reason)
            }
            PredicateError::InvalidOperand {
                operator,
                expected,
                found,
            } => {
                write!(
                    f,
                    "The '{}' operator expects {}, got '{}'",
                    operator, expected, found
                )
            }
        }
    }
}

impl std::error::Error for PredicateError {}
