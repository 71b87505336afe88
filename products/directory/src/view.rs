//! List view state: raw collection, query, derived sequence and the fetch
//! generation that guards against stale responses.
//!
//! Recompute triggers:
//! - a new raw collection arrives ⇒ derive again, page 1;
//! - search, filters or sort change ⇒ derive again, page 1;
//! - only the page changes ⇒ reslice the existing derived sequence.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    error::DirectoryError,
    filter,
    model::Employee,
    pagination::{ITEMS_PER_PAGE, Pagination},
    pipeline,
    query::DirectoryQuery,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Handle for one employee fetch. Only the most recently issued ticket may
/// update the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub group_id: Option<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// A newer request was issued after this one; the result was dropped.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewChange {
    Recomputed,
    Resliced,
    /// Requested page was outside `[1, total_pages]`.
    Rejected,
    Unchanged,
}

/// The visible page and what is needed to render around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView<'a> {
    pub items: &'a [Employee],
    pub pagination: Pagination,
    pub total_matches: usize,
}

impl PageView<'_> {
    /// An empty result is shown as an explicit "no results" row.
    pub fn no_results(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug)]
pub struct ListView {
    raw: Arc<[Employee]>,
    query: DirectoryQuery,
    derived: Vec<Employee>,
    state: LoadState,
    generation: u64,
    per_page: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(DirectoryQuery::default())
    }
}

impl ListView {
    pub fn new(query: DirectoryQuery) -> Self {
        Self {
            raw: Arc::from(Vec::new()),
            query: query.with_page(1),
            derived: Vec::new(),
            state: LoadState::Idle,
            generation: 0,
            per_page: ITEMS_PER_PAGE,
        }
    }

    pub fn query(&self) -> &DirectoryQuery {
        &self.query
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn raw(&self) -> &[Employee] {
        &self.raw
    }

    /// Filtered and sorted sequence before pagination.
    pub fn derived(&self) -> &[Employee] {
        &self.derived
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn begin_load(&mut self, group_id: Option<i64>) -> FetchTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        debug!(generation = self.generation, ?group_id, "employee fetch issued");
        FetchTicket {
            generation: self.generation,
            group_id,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn complete_load(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Employee>, DirectoryError>,
    ) -> LoadOutcome {
        if !self.is_current(&ticket) {
            warn!(
                generation = ticket.generation,
                latest = self.generation,
                group_id = ?ticket.group_id,
                "discarding stale employee response"
            );
            return LoadOutcome::Stale;
        }
        match result {
            Ok(employees) => {
                self.raw = Arc::from(employees);
                self.state = LoadState::Ready;
                self.recompute();
                LoadOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, group_id = ?ticket.group_id, "employee fetch failed");
                self.raw = Arc::from(Vec::new());
                self.derived.clear();
                self.query = self.query.with_page(1);
                self.state = LoadState::Failed(err.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Replace the query. Criteria changes recompute and return to page 1;
    /// a page-only change reslices when the page exists.
    pub fn apply(&mut self, next: DirectoryQuery) -> ViewChange {
        if !self.query.same_criteria(&next) {
            self.query = next;
            self.recompute();
            return ViewChange::Recomputed;
        }
        if next.page() == self.query.page() {
            return ViewChange::Unchanged;
        }
        if self.go_to_page(next.page()) {
            ViewChange::Resliced
        } else {
            ViewChange::Rejected
        }
    }

    pub fn update(&mut self, f: impl FnOnce(&DirectoryQuery) -> DirectoryQuery) -> ViewChange {
        let next = f(&self.query);
        self.apply(next)
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        if !self.pagination().can_navigate_to(page) {
            debug!(page, "page request out of range");
            return false;
        }
        self.query = self.query.with_page(page);
        true
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.derived.len(), self.per_page, self.query.page())
    }

    pub fn page(&self) -> PageView<'_> {
        PageView {
            items: pipeline::paginate(&self.derived, self.query.page(), self.per_page),
            pagination: self.pagination(),
            total_matches: self.derived.len(),
        }
    }

    /// Department choices from the unfiltered collection.
    pub fn department_options(&self) -> Vec<String> {
        filter::department_options(&self.raw)
    }

    fn recompute(&mut self) {
        self.derived = pipeline::derive(&self.raw, &self.query);
        self.query = self.query.with_page(1);
        debug!(
            raw = self.raw.len(),
            matches = self.derived.len(),
            "derived view recomputed"
        );
    }
}
