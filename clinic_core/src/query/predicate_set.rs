//! Combining predicates into a single match decision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Predicate, PredicateError};
use crate::record::Record;

/// An ordered list of predicates.
///
/// Predicates tagged OR form one bucket, everything else forms the AND
/// bucket. A record matches when every AND predicate matches and at least one
/// OR predicate matches; an empty bucket does not constrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredicateSet(Vec<Predicate>);

impl PredicateSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn add(&mut self, predicate: Predicate) {
        self.0.push(predicate);
    }

    /// Remove a predicate by id. Returns the removed predicate, if any.
    pub fn remove(&mut self, id: &str) -> Option<Predicate> {
        let index = self.0.iter().position(|p| p.id == id)?;
        Some(self.0.remove(index))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Predicate> {
        self.0.iter()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.matches_at(record, Utc::now())
    }

    pub fn matches_at(&self, record: &Record, now: DateTime<Utc>) -> bool {
        let (or_group, and_group): (Vec<&Predicate>, Vec<&Predicate>) =
            self.0.iter().partition(|p| p.is_or());

        let and_result = and_group.iter().all(|p| p.evaluate_at(record, now));
        let or_result = or_group.is_empty() || or_group.iter().any(|p| p.evaluate_at(record, now));

        and_result && or_result
    }

    /// Every predicate that will never match because it is malformed, with
    /// the reason.
    pub fn validate(&self) -> Vec<(String, PredicateError)> {
        self.0
            .iter()
            .filter_map(|p| p.validate().err().map(|e| (p.id.clone(), e)))
            .collect()
    }
}

impl From<Vec<Predicate>> for PredicateSet {
    fn from(predicates: Vec<Predicate>) -> Self {
        Self(predicates)
    }
}

impl FromIterator<Predicate> for PredicateSet {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PredicateSet {
    type Item = &'a Predicate;
    type IntoIter = std::slice::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
