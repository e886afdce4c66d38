//! The enquiry list pipeline: search, simple filters, advanced filters and
//! the role gate, followed by pagination.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PredicateSet;
use super::filter::stringify;
use crate::config::{EngineConfig, RoleGate};
use crate::record::Record;

/// Sentinel meaning "do not filter on this field".
pub const ALL: &str = "all";

/// The filters above the list: the search box and the two dropdowns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimpleFilters {
    pub search: String,
    pub status: String,
    pub category: String,
}

impl Default for SimpleFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: ALL.to_string(),
            category: ALL.to_string(),
        }
    }
}

impl SimpleFilters {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn is_default(&self) -> bool {
        self == &Self::default()
    }
}

/// Who is looking at the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewer {
    pub role: Option<String>,
}

impl Viewer {
    pub fn anonymous() -> Self {
        Self { role: None }
    }

    pub fn with_role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
        }
    }
}

/// Runs the list pipeline over a snapshot of records.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    config: EngineConfig,
}

impl FilterEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Filter records, keeping their order. See [`FilterEngine::apply_at`].
    pub fn apply<'a>(
        &self,
        records: &'a [Record],
        filters: &SimpleFilters,
        predicates: &PredicateSet,
        viewer: &Viewer,
    ) -> Vec<&'a Record> {
        self.apply_at(records, filters, predicates, viewer, Utc::now())
    }

    /// Filter records in stages, each seeing only the survivors of the last:
    /// free-text search, status, category, the predicate set, then the role
    /// gate.
    pub fn apply_at<'a>(
        &self,
        records: &'a [Record],
        filters: &SimpleFilters,
        predicates: &PredicateSet,
        viewer: &Viewer,
        now: DateTime<Utc>,
    ) -> Vec<&'a Record> {
        let mut results: Vec<&Record> = records.iter().collect();
        debug!("Filtering {} records", results.len());

        if !filters.search.is_empty() {
            results.retain(|record| self.matches_search(record, &filters.search));
            debug!("{} records after search '{}'", results.len(), filters.search);
        }

        if filters.status != ALL {
            results.retain(|record| field_equals(record, &self.config.status_field, &filters.status));
            debug!("{} records after status '{}'", results.len(), filters.status);
        }

        if filters.category != ALL {
            results.retain(|record| {
                field_equals(record, &self.config.category_field, &filters.category)
            });
            debug!("{} records after category '{}'", results.len(), filters.category);
        }

        if !predicates.is_empty() {
            results.retain(|record| predicates.matches_at(record, now));
            debug!("{} records after {} predicates", results.len(), predicates.len());
        }

        if let Some(gate) = self.gate_for(viewer) {
            results.retain(|record| gate_allows(record, gate));
            debug!("{} records visible to role '{}'", results.len(), gate.role);
        }

        results
    }

    fn matches_search(&self, record: &Record, term: &str) -> bool {
        let lowered = term.to_lowercase();
        self.config.search_fields.iter().any(|field| {
            let Some(value) = record.resolve(field) else {
                return false;
            };
            let text = stringify(&value);
            if self.config.is_case_sensitive(field) {
                text.contains(term)
            } else {
                text.to_lowercase().contains(&lowered)
            }
        })
    }

    fn gate_for(&self, viewer: &Viewer) -> Option<&RoleGate> {
        let gate = self.config.role_gate.as_ref()?;
        let role = viewer.role.as_deref()?;
        role.eq_ignore_ascii_case(&gate.role).then_some(gate)
    }
}

fn field_equals(record: &Record, path: &str, expected: &str) -> bool {
    record
        .resolve(path)
        .is_some_and(|value| stringify(&value) == expected)
}

fn gate_allows(record: &Record, gate: &RoleGate) -> bool {
    match record.resolve(&gate.field).as_deref() {
        Some(Value::String(s)) => s.eq_ignore_ascii_case(&gate.value),
        Some(Value::Array(items)) => items
            .iter()
            .any(|item| item.as_str().is_some_and(|s| s.eq_ignore_ascii_case(&gate.value))),
        _ => false,
    }
}

/// One page of an already filtered and ordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
    pub items: Vec<&'a Record>,
    pub page: usize,
    pub page_size: usize,
    /// Size of the whole filtered list
    pub total: usize,
    pub total_pages: usize,
}

/// Slice out `[page * page_size, page * page_size + page_size)`.
pub fn paginate<'a>(records: &[&'a Record], page: usize, page_size: usize) -> Page<'a> {
    let total = records.len();
    let total_pages = if page_size == 0 { 0 } else { total.div_ceil(page_size) };
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    Page {
        items: records[start..end].to_vec(),
        page,
        page_size,
        total,
        total_pages,
    }
}
