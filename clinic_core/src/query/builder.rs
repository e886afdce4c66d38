//! Draft predicates, validated when they are added to a set

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use log::debug;
use serde_json::Value;

use super::{LogicalOperator, Operator, Predicate, PredicateError};
use crate::catalog::{FieldCatalog, FieldDescriptor};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Fresh predicate id, unique within the process.
pub fn next_predicate_id() -> String {
    let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("filter-{}-{}", Utc::now().timestamp_millis(), seq)
}

/// The draft row of the advanced filter builder.
///
/// Choosing a field fixes the data type and resets the operator to the first
/// one registered for it. `build` checks the draft and hands out a predicate
/// with a fresh id.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBuilder {
    field: FieldDescriptor,
    operator: Operator,
    value: Value,
    logical_operator: LogicalOperator,
}

impl FilterBuilder {
    pub fn new(field: FieldDescriptor) -> Self {
        let operator = first_operator(&field);
        Self {
            field,
            operator,
            value: Value::Null,
            logical_operator: LogicalOperator::And,
        }
    }

    /// Start a draft for a field path in the catalog.
    pub fn for_path(catalog: &FieldCatalog, path: &str) -> Result<Self, PredicateError> {
        catalog
            .get(path)
            .cloned()
            .map(Self::new)
            .ok_or_else(|| PredicateError::UnknownField(path.to_string()))
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.operator = first_operator(&field);
        self.field = field;
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operator = operator;
        self
    }

    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = value.into();
        self
    }

    pub fn logical_operator(mut self, logical_operator: LogicalOperator) -> Self {
        self.logical_operator = logical_operator;
        self
    }

    pub fn current_operator(&self) -> Operator {
        self.operator
    }

    pub fn build(self) -> Result<Predicate, PredicateError> {
        let predicate = Predicate {
            id: next_predicate_id(),
            field: self.field.path,
            operator: self.operator,
            value: self.value,
            data_type: self.field.data_type,
            logical_operator: Some(self.logical_operator),
        };
        predicate.validate()?;
        debug!(
            "Built predicate '{}': {} {} {}",
            predicate.id, predicate.field, predicate.operator, predicate.value
        );
        Ok(predicate)
    }
}

fn first_operator(field: &FieldDescriptor) -> Operator {
    field
        .data_type
        .operators()
        .first()
        .copied()
        .unwrap_or(Operator::Unsupported)
}
