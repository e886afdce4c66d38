//! Filter state of the list view as an immutable value

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::{FilterEngine, Page, SimpleFilters, Viewer, paginate};
use super::order::{SortSpec, sort_records};
use super::{Predicate, PredicateSet};
use crate::preset::Preset;
use crate::record::Record;

/// Everything the list view needs to derive what it shows.
///
/// Each `with_*` method returns a new state. Any change other than moving to
/// another page sends the view back to the first page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    filters: SimpleFilters,
    predicates: PredicateSet,
    sort: Option<SortSpec>,
    page: usize,
    page_size: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FilterState {
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: SimpleFilters::default(),
            predicates: PredicateSet::new(),
            sort: None,
            page: 0,
            page_size,
        }
    }

    pub fn filters(&self) -> &SimpleFilters {
        &self.filters
    }

    pub fn predicates(&self) -> &PredicateSet {
        &self.predicates
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        let filters = self.filters.clone().with_search(search);
        self.with_filters(filters)
    }

    pub fn with_status(self, status: impl Into<String>) -> Self {
        let filters = self.filters.clone().with_status(status);
        self.with_filters(filters)
    }

    pub fn with_category(self, category: impl Into<String>) -> Self {
        let filters = self.filters.clone().with_category(category);
        self.with_filters(filters)
    }

    /// Replace the simple filters wholesale.
    pub fn with_filters(self, filters: SimpleFilters) -> Self {
        Self {
            filters,
            page: 0,
            ..self
        }
    }

    /// Load a preset. Only the simple filters are replaced; predicates stay.
    pub fn with_preset(self, preset: &Preset) -> Self {
        self.with_filters(preset.filters.clone())
    }

    pub fn with_predicate(self, predicate: Predicate) -> Self {
        let mut predicates = self.predicates;
        predicates.add(predicate);
        Self {
            predicates,
            page: 0,
            ..self
        }
    }

    pub fn without_predicate(self, id: &str) -> Self {
        let mut predicates = self.predicates;
        predicates.remove(id);
        Self {
            predicates,
            page: 0,
            ..self
        }
    }

    pub fn without_predicates(self) -> Self {
        Self {
            predicates: PredicateSet::new(),
            page: 0,
            ..self
        }
    }

    pub fn with_sort(self, sort: Option<SortSpec>) -> Self {
        Self {
            sort,
            page: 0,
            ..self
        }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        Self {
            page_size,
            page: 0,
            ..self
        }
    }

    pub fn with_page(self, page: usize) -> Self {
        Self { page, ..self }
    }

    /// Back to no filters, keeping the page size.
    pub fn reset(self) -> Self {
        Self::new(self.page_size)
    }

    /// Filter, sort and paginate a snapshot of records.
    pub fn run<'a>(&self, engine: &FilterEngine, records: &'a [Record], viewer: &Viewer) -> Page<'a> {
        self.run_at(engine, records, viewer, Utc::now())
    }

    pub fn run_at<'a>(
        &self,
        engine: &FilterEngine,
        records: &'a [Record],
        viewer: &Viewer,
        now: DateTime<Utc>,
    ) -> Page<'a> {
        let mut filtered = engine.apply_at(records, &self.filters, &self.predicates, viewer, now);
        if let Some(sort) = &self.sort {
            sort_records(&mut filtered, sort);
        }
        paginate(&filtered, self.page, self.page_size)
    }
}
